//! Unit tests for the record normalizer.

use athletehub::athletes::{normalize, normalize_all, AthleteRecord};

fn record(name: &str, age: &str, matches: &str, fitness: &str) -> AthleteRecord {
    AthleteRecord {
        name: name.to_string(),
        age: age.to_string(),
        matches_played: matches.to_string(),
        fitness_level: fitness.to_string(),
        ..AthleteRecord::default()
    }
}

#[test]
fn test_malformed_input_is_finite_and_in_range() {
    let inputs = [
        record("", "", "", ""),
        record("  ", "abc", "NaN", "Legendary"),
        record("Ana", "inf", "-inf", "high"),
        record("Bo", "1e400", "12abc", "Excellent"),
    ];

    for input in &inputs {
        let row = normalize(input);
        assert!(row.age.is_finite(), "age for {:?}", input);
        assert!(row.matches_played.is_finite(), "matches for {:?}", input);
        assert!(row.goals_scored.is_finite());
        assert!(row.assists.is_finite());
        assert!((1..=4).contains(&row.fitness_level), "fitness for {:?}", input);
    }
}

#[test]
fn test_defaults_for_missing_fields() {
    let row = normalize(&record("", "", "", ""));
    assert_eq!(row.name, "Unknown");
    assert_eq!(row.age, 1.0);
    assert_eq!(row.matches_played, 0.0);
    assert_eq!(row.fitness_level, 1);
}

#[test]
fn test_fitness_ordinals() {
    let levels = ["Low", "Medium", "High", "Excellent"];
    for (i, level) in levels.iter().enumerate() {
        let row = normalize(&record("X", "20", "1", level));
        assert_eq!(row.fitness_level as usize, i + 1);
    }
}

#[test]
fn test_normalize_all_keeps_order() {
    let records = vec![record("B", "20", "1", ""), record("A", "21", "2", "")];
    let rows = normalize_all(&records);
    assert_eq!(rows[0].name, "B");
    assert_eq!(rows[1].name, "A");
    assert_eq!(rows[1].matches_played, 2.0);
}
