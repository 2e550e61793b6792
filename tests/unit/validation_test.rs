//! Unit tests for draft validation.

use athletehub::athletes::{validate_draft, AthleteDraft, ValidationError};

fn valid() -> AthleteDraft {
    AthleteDraft {
        name: "Ana".to_string(),
        email: "ana@club.org".to_string(),
        age: "21".to_string(),
        sport: "Football".to_string(),
        matches_played: "0".to_string(),
        goals_scored: String::new(),
        assists: String::new(),
        fitness_level: "High".to_string(),
    }
}

#[test]
fn test_valid_draft_passes() {
    assert_eq!(validate_draft(&valid()), Ok(()));
}

#[test]
fn test_rules_short_circuit_in_order() {
    let mut draft = AthleteDraft::default();
    assert_eq!(validate_draft(&draft), Err(ValidationError::MissingName));

    draft.name = "Ana".to_string();
    assert_eq!(validate_draft(&draft), Err(ValidationError::InvalidAge));

    draft.age = "21".to_string();
    assert_eq!(validate_draft(&draft), Err(ValidationError::InvalidEmail));

    draft.email = "ana@club.org".to_string();
    assert_eq!(validate_draft(&draft), Err(ValidationError::MissingSport));

    draft.sport = "Football".to_string();
    draft.matches_played = "-1".to_string();
    assert_eq!(validate_draft(&draft), Err(ValidationError::InvalidMatchesPlayed));
}

#[test]
fn test_error_names_field() {
    let mut draft = valid();
    draft.email = "not-an-email".to_string();
    let err = validate_draft(&draft).unwrap_err();
    assert_eq!(err.field(), "email");
    assert_eq!(err.to_string(), "Please enter a valid email address.");
}
