//! Match calendar heatmap aggregation.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use super::normalize::parse_number;
use super::types::{parse_date, AthleteRecord};

/// Days shown before today.
pub const WINDOW_DAYS: u64 = 180;

/// Highest intensity class.
pub const MAX_INTENSITY: u8 = 4;

/// Matches played per calendar date, summed across athletes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeatmapBuckets {
    buckets: BTreeMap<NaiveDate, f64>,
}

impl HeatmapBuckets {
    /// Fold every (athlete, match date) pair into per-date sums.
    ///
    /// Each pair contributes the athlete's matchesPlayed. Duplicate dates add
    /// up; unparsable dates are skipped.
    pub fn aggregate(records: &[AthleteRecord]) -> Self {
        let mut buckets = BTreeMap::new();

        for record in records {
            let count = parse_number(&record.matches_played, 0.0);
            for date in record.match_dates.iter().filter_map(|d| parse_date(d)) {
                *buckets.entry(date).or_insert(0.0) += count;
            }
        }

        Self { buckets }
    }

    /// Sum for a date, 0 if none.
    pub fn get(&self, date: NaiveDate) -> f64 {
        self.buckets.get(&date).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets inside the window, oldest first.
    pub fn visible(&self, window: HeatmapWindow) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.buckets
            .range(window.start..=window.end)
            .map(|(date, count)| (*date, *count))
    }
}

/// Inclusive date range rendered by the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HeatmapWindow {
    /// Trailing window ending on `today`.
    pub fn ending_on(today: NaiveDate) -> Self {
        Self {
            start: today.checked_sub_days(Days::new(WINDOW_DAYS)).unwrap_or(today),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the window, oldest first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

/// Color class of a bucket: 0 for empty, otherwise `min(count, 4)`.
pub fn intensity(count: f64) -> u8 {
    if count <= 0.0 {
        0
    } else {
        count.ceil().min(f64::from(MAX_INTENSITY)) as u8
    }
}
