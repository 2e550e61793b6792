//! Draft validation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::types::AthleteDraft;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("valid email regex")
});

/// First failed rule of a draft.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter the athlete's name.")]
    MissingName,

    #[error("Please enter a valid age (positive number).")]
    InvalidAge,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter the sport.")]
    MissingSport,

    #[error("Please enter a valid number of matches played (0 or greater).")]
    InvalidMatchesPlayed,
}

impl ValidationError {
    /// Stored name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::InvalidAge => "age",
            ValidationError::InvalidEmail => "email",
            ValidationError::MissingSport => "sport",
            ValidationError::InvalidMatchesPlayed => "matchesPlayed",
        }
    }
}

/// Check a draft, stopping at the first failure.
///
/// Order: name, age, email, sport, matchesPlayed.
pub fn validate_draft(draft: &AthleteDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !matches!(parse_finite(&draft.age), Some(age) if age > 0.0) {
        return Err(ValidationError::InvalidAge);
    }
    if !is_valid_email(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if draft.sport.trim().is_empty() {
        return Err(ValidationError::MissingSport);
    }
    if !matches!(parse_finite(&draft.matches_played), Some(n) if n >= 0.0) {
        return Err(ValidationError::InvalidMatchesPlayed);
    }
    Ok(())
}

/// Whether a string looks like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn parse_finite(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> AthleteDraft {
        AthleteDraft {
            name: "Ana".into(),
            email: "ana@club.com".into(),
            age: "21".into(),
            sport: "Soccer".into(),
            matches_played: "0".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        assert_eq!(validate_draft(&valid()), Ok(()));
    }

    #[test]
    fn test_first_failure_wins() {
        let draft = AthleteDraft {
            name: "  ".into(),
            age: "-1".into(),
            ..valid()
        };
        assert_eq!(validate_draft(&draft), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_age_rules() {
        for age in ["", "0", "abc", "-3"] {
            let draft = AthleteDraft {
                age: age.into(),
                ..valid()
            };
            assert_eq!(validate_draft(&draft), Err(ValidationError::InvalidAge), "{age}");
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a.b-c@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b.toolong"));
        assert!(!is_valid_email("no-at.com"));
    }

    #[test]
    fn test_matches_played_may_be_zero_not_negative() {
        let draft = AthleteDraft {
            matches_played: "-1".into(),
            ..valid()
        };
        assert_eq!(
            validate_draft(&draft).map_err(|e| e.field()),
            Err("matchesPlayed")
        );
    }
}
