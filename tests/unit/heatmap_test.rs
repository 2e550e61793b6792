//! Unit tests for the match heatmap.

use athletehub::athletes::{intensity, AthleteRecord, HeatmapBuckets, HeatmapWindow};
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn athlete(matches: &str, dates: &[&str]) -> AthleteRecord {
    AthleteRecord {
        matches_played: matches.to_string(),
        match_dates: dates.iter().map(|d| d.to_string()).collect(),
        ..AthleteRecord::default()
    }
}

#[test]
fn test_identical_dates_sum() {
    let records = vec![athlete("3", &["2025-03-09", "2025-03-09"])];
    let buckets = HeatmapBuckets::aggregate(&records);

    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets.get(day(2025, 3, 9)), 6.0);
}

#[test]
fn test_dates_sum_across_athletes_and_skip_garbage() {
    let records = vec![
        athlete("2", &["2025-03-09", "not a date"]),
        athlete("5", &["2025-03-09T10:00:00Z", "2025-03-10"]),
    ];
    let buckets = HeatmapBuckets::aggregate(&records);

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets.get(day(2025, 3, 9)), 7.0);
    assert_eq!(buckets.get(day(2025, 3, 10)), 5.0);
    assert_eq!(buckets.get(day(2025, 3, 11)), 0.0);
}

#[test]
fn test_window_hides_old_buckets() {
    let today = day(2025, 6, 30);
    let window = HeatmapWindow::ending_on(today);
    let records = vec![athlete("1", &["2024-01-01", "2025-06-01"])];
    let buckets = HeatmapBuckets::aggregate(&records);

    assert_eq!(buckets.len(), 2);
    let visible: Vec<_> = buckets.visible(window).collect();
    assert_eq!(visible, vec![(day(2025, 6, 1), 1.0)]);
    assert!(window.contains(today));
    assert!(!window.contains(day(2024, 1, 1)));
}

#[test]
fn test_intensity_classes() {
    assert_eq!(intensity(0.0), 0);
    assert_eq!(intensity(1.0), 1);
    assert_eq!(intensity(4.0), 4);
    assert_eq!(intensity(12.0), 4);
}
