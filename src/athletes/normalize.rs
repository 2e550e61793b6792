//! Record normalizer.
//!
//! Turns loosely typed athlete records into chart-ready rows. Every field has
//! a total coercion, so malformed input never fails and never yields NaN.

use super::types::{fitness_ordinal, AthleteRecord, UNKNOWN_NAME};

/// Chart-ready view of one athlete. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub name: String,
    pub age: f64,
    pub matches_played: f64,
    pub goals_scored: f64,
    pub assists: f64,
    /// Ordinal in 1..=4
    pub fitness_level: u8,
}

/// Normalize one record.
pub fn normalize(record: &AthleteRecord) -> ChartRow {
    let name = if record.name.trim().is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        record.name.clone()
    };

    ChartRow {
        name,
        age: parse_number(&record.age, 1.0),
        matches_played: parse_number(&record.matches_played, 0.0),
        goals_scored: parse_number(&record.goals_scored, 0.0),
        assists: parse_number(&record.assists, 0.0),
        fitness_level: fitness_ordinal(&record.fitness_level),
    }
}

/// Normalize a snapshot, keeping its order.
pub fn normalize_all(records: &[AthleteRecord]) -> Vec<ChartRow> {
    records.iter().map(normalize).collect()
}

/// Parse a numeric text field, falling back to `default`.
pub fn parse_number(raw: &str, default: f64) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(default)
}
