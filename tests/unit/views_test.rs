//! Unit tests for derived table and chart views.

use athletehub::athletes::{
    age_distribution, fitness_series, normalize_all, sport_facet, stat_series, AthleteRecord,
    SeriesKind, SortDirection, SortField, SortState, TableQuery,
};

fn record(id: &str, name: &str, sport: &str, age: &str, matches: &str) -> AthleteRecord {
    AthleteRecord {
        id: id.to_string(),
        name: name.to_string(),
        sport: sport.to_string(),
        age: age.to_string(),
        matches_played: matches.to_string(),
        ..AthleteRecord::default()
    }
}

fn ids(query: &TableQuery, records: &[AthleteRecord]) -> Vec<String> {
    query
        .apply(records)
        .iter()
        .map(|row| row.record.id.clone())
        .collect()
}

#[test]
fn test_sort_is_stable() {
    let records = vec![
        record("1", "Ana", "Football", "20", "5"),
        record("2", "Bo", "Tennis", "25", "3"),
        record("3", "Cy", "Football", "20", "9"),
        record("4", "Di", "Tennis", "25", "1"),
    ];
    let query = TableQuery {
        sort: SortState::new(SortField::Age, SortDirection::Ascending),
        ..TableQuery::default()
    };

    assert_eq!(ids(&query, &records), vec!["1", "3", "2", "4"]);
}

#[test]
fn test_descending_reverses_ascending_for_distinct_keys() {
    let records = vec![
        record("1", "Cy", "", "30", "4"),
        record("2", "Ana", "", "22", "7"),
        record("3", "Bo", "", "27", "1"),
    ];

    for field in [SortField::Name, SortField::Age, SortField::MatchesPlayed] {
        let mut query = TableQuery::default();
        query.sort = SortState::new(field, SortDirection::Ascending);
        let ascending = ids(&query, &records);

        query.sort = SortState::new(field, SortDirection::Descending);
        let mut descending = ids(&query, &records);
        descending.reverse();

        assert_eq!(ascending, descending, "field {:?}", field);
    }
}

#[test]
fn test_numeric_fields_compare_as_numbers() {
    let records = vec![
        record("1", "A", "", "9", "0"),
        record("2", "B", "", "10", "0"),
    ];
    let query = TableQuery {
        sort: SortState::new(SortField::Age, SortDirection::Ascending),
        ..TableQuery::default()
    };
    assert_eq!(ids(&query, &records), vec!["1", "2"]);
}

#[test]
fn test_header_click_toggles() {
    let mut sort = SortState::default();
    sort.toggle(SortField::Age);
    assert_eq!(sort, SortState::new(SortField::Age, SortDirection::Ascending));
    sort.toggle(SortField::Age);
    assert_eq!(sort, SortState::new(SortField::Age, SortDirection::Descending));
    sort.toggle(SortField::Age);
    assert_eq!(sort, SortState::new(SortField::Age, SortDirection::Ascending));
    sort.toggle(SortField::Sport);
    assert_eq!(sort, SortState::new(SortField::Sport, SortDirection::Ascending));
}

#[test]
fn test_search_and_sport_filter() {
    let records = vec![
        record("1", "Anna", "Football", "20", "1"),
        record("2", "Hannah", "football", "20", "1"),
        record("3", "Annie", "Tennis", "20", "1"),
        record("4", "Bo", "Football", "20", "1"),
    ];
    let query = TableQuery {
        search: "ANN".to_string(),
        sport: Some("FOOTBALL".to_string()),
        sort: SortState::default(),
    };

    assert_eq!(ids(&query, &records), vec!["1", "2"]);
    assert_eq!(sport_facet(&records), vec!["Football", "football", "Tennis"]);
}

#[test]
fn test_chart_series() {
    let records = vec![
        record("1", "Ana", "", "20", "5"),
        record("2", "Bo", "", "0", "3"),
    ];
    let rows = normalize_all(&records);

    let [matches, goals, assists] = stat_series(&rows);
    assert_eq!(matches.kind, SeriesKind::Bar);
    assert_eq!(goals.kind, SeriesKind::Line);
    assert_eq!(assists.kind, SeriesKind::Bar);
    assert_eq!(matches.points, vec![("Ana".to_string(), 5.0), ("Bo".to_string(), 3.0)]);

    let fitness = fitness_series(&rows);
    assert!(fitness.points.iter().all(|(_, level)| *level == 1.0));

    // Age 0 is excluded
    assert_eq!(age_distribution(&rows), vec![("Ana".to_string(), 20.0)]);
}
