//! Integration tests for the record mutation gateway.

use std::sync::Arc;

use athletehub::athletes::{
    AthleteDraft, AthleteForm, AthleteGateway, AthleteRecord, InjuryDraft, InjuryStatus,
    SaveError, SaveOutcome, ValidationError, ATHLETES,
};
use athletehub::storage::{Document, Fields, StoreError};
use chrono::NaiveDate;
use serde_json::json;

use crate::mocks::{MockStore, StoreOp};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
}

fn draft(level: &str) -> AthleteDraft {
    AthleteDraft {
        name: "Ana".to_string(),
        email: "ana@club.org".to_string(),
        age: "21".to_string(),
        sport: "Football".to_string(),
        matches_played: "4".to_string(),
        goals_scored: "2".to_string(),
        assists: "1".to_string(),
        fitness_level: level.to_string(),
    }
}

fn seeded(store: &MockStore, id: &str, level: &str) {
    let mut fields = draft(level).to_fields();
    fields.insert("fitnessHistory".to_string(), json!([]));
    fields.insert("matchDates".to_string(), json!(["2025-03-01"]));
    store.insert(ATHLETES, id, fields);
}

#[tokio::test]
async fn test_invalid_draft_makes_no_store_calls() {
    let store = Arc::new(MockStore::new());
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let mut bad = draft("High");
    bad.name = "   ".to_string();

    let result = gateway.save_at(&bad, None, today()).await;
    assert_eq!(result, Err(SaveError::Validation(ValidationError::MissingName)));

    let result = gateway.save_at(&bad, Some("a1"), today()).await;
    assert_eq!(result, Err(SaveError::Validation(ValidationError::MissingName)));

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_update_appends_previous_level() {
    let store = Arc::new(MockStore::new());
    seeded(&store, "a1", "High");
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let outcome = gateway.save_at(&draft("Low"), Some("a1"), today()).await;
    assert_eq!(outcome, Ok(SaveOutcome::Updated));
    assert_eq!(store.reads(), 1);
    assert_eq!(store.writes(), 1);

    let fields = store.fields(ATHLETES, "a1").unwrap();
    assert_eq!(fields["fitnessLevel"], json!("Low"));
    assert_eq!(
        fields["fitnessHistory"],
        json!([{ "date": "2025-03-09", "level": "High" }])
    );
    // Fields outside the draft are untouched
    assert_eq!(fields["matchDates"], json!(["2025-03-01"]));
}

#[tokio::test]
async fn test_same_day_edits_are_not_deduplicated() {
    let store = Arc::new(MockStore::new());
    seeded(&store, "a1", "Medium");
    let gateway = AthleteGateway::new(Arc::clone(&store));

    gateway.save_at(&draft("Medium"), Some("a1"), today()).await.unwrap();
    gateway.save_at(&draft("Medium"), Some("a1"), today()).await.unwrap();

    let fields = store.fields(ATHLETES, "a1").unwrap();
    assert_eq!(fields["fitnessHistory"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_edit_round_trip_keeps_history() {
    let store = Arc::new(MockStore::new());
    seeded(&store, "a1", "High");
    let gateway = AthleteGateway::new(Arc::clone(&store));
    gateway.save_at(&draft("Low"), Some("a1"), today()).await.unwrap();

    let doc = Document::new("a1", store.fields(ATHLETES, "a1").unwrap());
    let record = AthleteRecord::from_document(&doc);
    let mut form = AthleteForm::new();
    form.begin_edit(&record);
    assert_eq!(form.editing_id.as_deref(), Some("a1"));
    assert_eq!(form.draft, draft("Low"));

    let outcome = gateway.submit(&mut form).await;
    assert_eq!(outcome, Ok(SaveOutcome::Updated));
    assert!(!form.is_editing());

    let fields = store.fields(ATHLETES, "a1").unwrap();
    assert!(!fields.contains_key("id"));
    let history = fields["fitnessHistory"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], json!({ "date": "2025-03-09", "level": "High" }));
    assert_eq!(history[1]["level"], json!("Low"));
}

#[tokio::test]
async fn test_deleted_while_editing_is_lost_update() {
    let store = Arc::new(MockStore::new());
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let outcome = gateway.save_at(&draft("Low"), Some("gone"), today()).await;
    assert_eq!(outcome, Ok(SaveOutcome::LostUpdate));
    assert_eq!(store.writes(), 0);
    assert!(store.fields(ATHLETES, "gone").is_none());
}

#[tokio::test]
async fn test_create_and_delete() {
    let store = Arc::new(MockStore::new());
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let Ok(SaveOutcome::Created(id)) = gateway.save_at(&draft("High"), None, today()).await else {
        panic!("expected a create");
    };
    assert_eq!(store.fields(ATHLETES, &id).unwrap()["fitnessHistory"], json!([]));

    gateway.delete(&id).await.unwrap();
    assert!(store.fields(ATHLETES, &id).is_none());
}

#[tokio::test]
async fn test_record_injury_appends_to_legacy_text() {
    let store = Arc::new(MockStore::new());
    let mut fields = Fields::new();
    fields.insert("name".to_string(), json!("Ana"));
    fields.insert("injuryHistory".to_string(), json!("Sprained ankle"));
    store.insert(ATHLETES, "a1", fields);
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let injury = InjuryDraft {
        injury_type: "  Hamstring strain ".to_string(),
        status: InjuryStatus::default(),
    };
    gateway.record_injury("a1", &injury).await.unwrap();

    let fields = store.fields(ATHLETES, "a1").unwrap();
    assert_eq!(
        fields["injuryHistory"],
        json!(["Sprained ankle", { "type": "Hamstring strain", "status": "Ongoing" }])
    );
}

#[tokio::test]
async fn test_failed_create_is_reported_as_remote() {
    let store = Arc::new(MockStore::failing_on(StoreOp::Create));
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let result = gateway.save_at(&draft("High"), None, today()).await;
    assert!(matches!(
        result,
        Err(SaveError::Remote(StoreError::ConnectionFailed(_)))
    ));
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn test_failed_update_is_reported_as_remote() {
    let store = Arc::new(MockStore::failing_on(StoreOp::Update));
    seeded(&store, "a1", "High");
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let result = gateway.save_at(&draft("Low"), Some("a1"), today()).await;
    assert!(matches!(result, Err(SaveError::Remote(_))));

    let fields = store.fields(ATHLETES, "a1").unwrap();
    assert_eq!(fields["fitnessLevel"], json!("High"));
    assert_eq!(fields["fitnessHistory"], json!([]));
}

#[tokio::test]
async fn test_failed_submit_keeps_form() {
    let store = Arc::new(MockStore::failing_on(StoreOp::Update));
    seeded(&store, "a1", "High");
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let mut form = AthleteForm {
        draft: draft("Low"),
        editing_id: Some("a1".to_string()),
    };
    let before = form.clone();

    let result = gateway.submit(&mut form).await;
    assert!(matches!(result, Err(SaveError::Remote(_))));
    assert_eq!(form, before);

    let mut form = AthleteForm {
        draft: draft("Low"),
        editing_id: None,
    };
    let result = gateway.submit(&mut form).await;
    assert!(matches!(result, Ok(SaveOutcome::Created(_))));
    assert_eq!(form, AthleteForm::default());
}

#[tokio::test]
async fn test_failed_pre_read_writes_nothing() {
    let store = Arc::new(MockStore::failing_on(StoreOp::Get));
    seeded(&store, "a1", "High");
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let result = gateway.save_at(&draft("Low"), Some("a1"), today()).await;
    assert!(matches!(result, Err(SaveError::Remote(_))));
    assert_eq!(store.reads(), 1);
    assert_eq!(store.writes(), 0);
    assert_eq!(
        store.fields(ATHLETES, "a1").unwrap()["fitnessHistory"],
        json!([])
    );
}
