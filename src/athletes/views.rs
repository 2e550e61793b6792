//! Derived views over the normalized roster.
//!
//! All functions are pure; the dashboards recompute them every frame.

use std::cmp::Ordering;

use super::normalize::{normalize, ChartRow};
use super::types::AthleteRecord;

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Email,
    Age,
    Sport,
    MatchesPlayed,
    GoalsScored,
    Assists,
    FitnessLevel,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::Name,
        SortField::Email,
        SortField::Age,
        SortField::Sport,
        SortField::MatchesPlayed,
        SortField::GoalsScored,
        SortField::Assists,
        SortField::FitnessLevel,
    ];

    /// Column header.
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Email => "Email",
            SortField::Age => "Age",
            SortField::Sport => "Sport",
            SortField::MatchesPlayed => "Matches",
            SortField::GoalsScored => "Goals",
            SortField::Assists => "Assists",
            SortField::FitnessLevel => "Fitness",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: the active ascending column flips to descending, anything
    /// else sorts ascending by the clicked column.
    pub fn toggle(&mut self, field: SortField) {
        self.direction = if self.field == field && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.field = field;
    }

    /// Header arrow for a column, if it is the active one.
    pub fn indicator(&self, field: SortField) -> Option<&'static str> {
        (self.field == field).then(|| match self.direction {
            SortDirection::Ascending => "⏶",
            SortDirection::Descending => "⏷",
        })
    }
}

/// One visible table row.
#[derive(Debug, Clone)]
pub struct TableRow<'a> {
    pub record: &'a AthleteRecord,
    pub chart: ChartRow,
}

/// Search, sort and sport filter for the roster table.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    /// Case-insensitive name substring
    pub search: String,
    /// Selected sport, `None` for all
    pub sport: Option<String>,
    pub sort: SortState,
}

impl TableQuery {
    /// Build the visible rows.
    ///
    /// Filters by name, stable-sorts, then applies the sport filter.
    pub fn apply<'a>(&self, records: &'a [AthleteRecord]) -> Vec<TableRow<'a>> {
        let needle = self.search.to_lowercase();

        let mut rows: Vec<TableRow<'a>> = records
            .iter()
            .map(|record| TableRow {
                record,
                chart: normalize(record),
            })
            .filter(|row| row.chart.name.to_lowercase().contains(&needle))
            .collect();

        sort_rows(&mut rows, self.sort);

        match self.sport.as_deref().filter(|s| !s.is_empty()) {
            Some(sport) => {
                let sport = sport.to_lowercase();
                rows.into_iter()
                    .filter(|row| row.record.sport.to_lowercase() == sport)
                    .collect()
            }
            None => rows,
        }
    }
}

/// Stable sort of table rows.
pub fn sort_rows(rows: &mut [TableRow<'_>], sort: SortState) {
    rows.sort_by(|a, b| {
        let ordering = compare(a, b, sort.field);
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

fn compare(a: &TableRow<'_>, b: &TableRow<'_>, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.chart.name.cmp(&b.chart.name),
        SortField::Email => a.record.email.cmp(&b.record.email),
        SortField::Sport => a.record.sport.cmp(&b.record.sport),
        SortField::Age => compare_numbers(a.chart.age, b.chart.age),
        SortField::MatchesPlayed => {
            compare_numbers(a.chart.matches_played, b.chart.matches_played)
        }
        SortField::GoalsScored => compare_numbers(a.chart.goals_scored, b.chart.goals_scored),
        SortField::Assists => compare_numbers(a.chart.assists, b.chart.assists),
        SortField::FitnessLevel => a.chart.fitness_level.cmp(&b.chart.fitness_level),
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Distinct non-empty sports in first-seen order.
pub fn sport_facet(records: &[AthleteRecord]) -> Vec<String> {
    let mut sports: Vec<String> = Vec::new();
    for record in records {
        if !record.sport.trim().is_empty() && !sports.contains(&record.sport) {
            sports.push(record.sport.clone());
        }
    }
    sports
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
}

/// A labeled chart series, one point per athlete.
#[derive(Debug, Clone, PartialEq)]
pub struct StatSeries {
    pub label: &'static str,
    pub kind: SeriesKind,
    /// (athlete name, value)
    pub points: Vec<(String, f64)>,
}

impl StatSeries {
    fn project(
        label: &'static str,
        kind: SeriesKind,
        rows: &[ChartRow],
        value: impl Fn(&ChartRow) -> f64,
    ) -> Self {
        Self {
            label,
            kind,
            points: rows.iter().map(|row| (row.name.clone(), value(row))).collect(),
        }
    }
}

/// Matches (bar), goals (line) and assists (bar) over the given rows.
pub fn stat_series(rows: &[ChartRow]) -> [StatSeries; 3] {
    [
        StatSeries::project("Matches Played", SeriesKind::Bar, rows, |r| r.matches_played),
        StatSeries::project("Goals Scored", SeriesKind::Line, rows, |r| r.goals_scored),
        StatSeries::project("Assists", SeriesKind::Bar, rows, |r| r.assists),
    ]
}

/// Fitness ordinal per athlete.
pub fn fitness_series(rows: &[ChartRow]) -> StatSeries {
    StatSeries::project("Fitness Level", SeriesKind::Bar, rows, |r| {
        f64::from(r.fitness_level)
    })
}

/// Age per athlete, excluding rows with age ≤ 0.
pub fn age_distribution(rows: &[ChartRow]) -> Vec<(String, f64)> {
    rows.iter()
        .filter(|row| row.age > 0.0)
        .map(|row| (row.name.clone(), row.age))
        .collect()
}
