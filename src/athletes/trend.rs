//! Per-athlete fitness trend.

use super::types::{fitness_ordinal, parse_date, FitnessLevel, FitnessSnapshot};

/// One point of the trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    /// UTC midnight of the entry date, in milliseconds
    pub timestamp_ms: i64,
    /// Ordinal in 1..=4
    pub level: u8,
}

/// Fitness history as a time series, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitnessTrend {
    pub points: Vec<TrendPoint>,
}

/// Build the trend from a fitness history.
///
/// Entries with unparsable dates are dropped. Returns `None` when nothing is
/// left to draw.
pub fn fitness_trend(history: &[FitnessSnapshot]) -> Option<FitnessTrend> {
    let mut points: Vec<TrendPoint> = history
        .iter()
        .filter_map(|entry| {
            let date = parse_date(&entry.date)?;
            let timestamp_ms = date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis();
            Some(TrendPoint {
                timestamp_ms,
                level: fitness_ordinal(&entry.level),
            })
        })
        .collect();

    if points.is_empty() {
        return None;
    }

    points.sort_by_key(|p| p.timestamp_ms);
    Some(FitnessTrend { points })
}

/// Axis/tooltip label for an ordinal value; only whole steps 1..=4 have one.
pub fn level_label(value: f64) -> Option<&'static str> {
    if value.fract() != 0.0 || !(1.0..=4.0).contains(&value) {
        return None;
    }
    FitnessLevel::from_ordinal(value as u8).map(FitnessLevel::label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(date: &str, level: &str) -> FitnessSnapshot {
        FitnessSnapshot {
            date: date.to_string(),
            level: level.to_string(),
        }
    }

    #[test]
    fn test_sorted_by_time_and_drops_bad_dates() {
        let trend = fitness_trend(&[
            snapshot("2025-03-01", "High"),
            snapshot("yesterday", "Low"),
            snapshot("2025-01-01", "Medium"),
        ])
        .unwrap();

        let levels: Vec<_> = trend.points.iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![2, 3]);
        assert!(trend.points[0].timestamp_ms < trend.points[1].timestamp_ms);
    }

    #[test]
    fn test_empty_history_has_no_trend() {
        assert!(fitness_trend(&[]).is_none());
        assert!(fitness_trend(&[snapshot("??", "High")]).is_none());
    }

    #[test]
    fn test_level_label_inverts_ordinal() {
        assert_eq!(level_label(3.0), Some("High"));
        assert_eq!(level_label(2.5), None);
        assert_eq!(level_label(0.0), None);
    }
}
