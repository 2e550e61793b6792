//! Athlete record types.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::{Document, Fields};

/// Placeholder shown (and searched) for athletes without a name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Qualitative fitness level with its ordinal on the 1..=4 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FitnessLevel {
    Low,
    Medium,
    High,
    Excellent,
}

impl FitnessLevel {
    /// All levels in ordinal order.
    pub const ALL: [FitnessLevel; 4] = [
        FitnessLevel::Low,
        FitnessLevel::Medium,
        FitnessLevel::High,
        FitnessLevel::Excellent,
    ];

    /// Parse a stored label. The vocabulary is matched exactly.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(FitnessLevel::Low),
            "Medium" => Some(FitnessLevel::Medium),
            "High" => Some(FitnessLevel::High),
            "Excellent" => Some(FitnessLevel::Excellent),
            _ => None,
        }
    }

    /// Ordinal on the 1..=4 scale.
    pub fn ordinal(self) -> u8 {
        match self {
            FitnessLevel::Low => 1,
            FitnessLevel::Medium => 2,
            FitnessLevel::High => 3,
            FitnessLevel::Excellent => 4,
        }
    }

    /// Level for an ordinal, `None` outside 1..=4.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(FitnessLevel::Low),
            2 => Some(FitnessLevel::Medium),
            3 => Some(FitnessLevel::High),
            4 => Some(FitnessLevel::Excellent),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            FitnessLevel::Low => "Low",
            FitnessLevel::Medium => "Medium",
            FitnessLevel::High => "High",
            FitnessLevel::Excellent => "Excellent",
        }
    }
}

/// Ordinal of a free-form fitness label; unknown or empty maps to 1.
pub fn fitness_ordinal(label: &str) -> u8 {
    FitnessLevel::parse(label).map(FitnessLevel::ordinal).unwrap_or(1)
}

/// Injury status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InjuryStatus {
    #[default]
    Ongoing,
    Recovered,
}

impl InjuryStatus {
    pub const ALL: [InjuryStatus; 2] = [InjuryStatus::Ongoing, InjuryStatus::Recovered];

    /// Parse a stored status, falling back to Ongoing.
    pub fn parse(status: &str) -> Self {
        match status {
            "Recovered" => InjuryStatus::Recovered,
            _ => InjuryStatus::Ongoing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InjuryStatus::Ongoing => "Ongoing",
            InjuryStatus::Recovered => "Recovered",
        }
    }
}

/// One injuryHistory entry: free text (legacy) or a typed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjuryEntry {
    Text(String),
    Detail {
        injury_type: String,
        status: InjuryStatus,
    },
}

impl InjuryEntry {
    /// Stored representation.
    pub fn to_value(&self) -> Value {
        match self {
            InjuryEntry::Text(text) => Value::String(text.clone()),
            InjuryEntry::Detail {
                injury_type,
                status,
            } => serde_json::json!({ "type": injury_type, "status": status.as_str() }),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) if !text.trim().is_empty() => Some(InjuryEntry::Text(text.clone())),
            Value::Object(entry) => Some(InjuryEntry::Detail {
                injury_type: entry.get("type").map(value_text).unwrap_or_default(),
                status: InjuryStatus::parse(&entry.get("status").map(value_text).unwrap_or_default()),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for InjuryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InjuryEntry::Text(text) => write!(f, "{}", text),
            InjuryEntry::Detail {
                injury_type,
                status,
            } => write!(f, "{} ({})", injury_type, status.as_str()),
        }
    }
}

/// One fitnessHistory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessSnapshot {
    /// yyyy-MM-dd
    pub date: String,
    /// fitnessLevel at the time of the entry
    pub level: String,
}

/// An athlete document as read from the store.
///
/// Reading is lenient: numbers are kept as text, a scalar injuryHistory is a
/// one-element history and non-string match dates are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AthleteRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: String,
    pub sport: String,
    pub matches_played: String,
    pub goals_scored: String,
    pub assists: String,
    pub fitness_level: String,
    pub injury_history: Vec<InjuryEntry>,
    pub fitness_history: Vec<FitnessSnapshot>,
    pub match_dates: Vec<String>,
}

impl AthleteRecord {
    /// Read a record from a stored document.
    pub fn from_document(doc: &Document) -> Self {
        let text = |field: &str| doc.get(field).map(value_text).unwrap_or_default();

        let injury_history = match doc.get("injuryHistory") {
            Some(Value::Array(items)) => items.iter().filter_map(InjuryEntry::from_value).collect(),
            Some(other) => InjuryEntry::from_value(other).into_iter().collect(),
            None => Vec::new(),
        };

        let fitness_history = match doc.get("fitnessHistory") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_object())
                .map(|entry| FitnessSnapshot {
                    date: entry.get("date").map(value_text).unwrap_or_default(),
                    level: entry.get("level").map(value_text).unwrap_or_default(),
                })
                .collect(),
            _ => Vec::new(),
        };

        let match_dates = match doc.get("matchDates") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: doc.id.clone(),
            name: text("name"),
            email: text("email"),
            age: text("age"),
            sport: text("sport"),
            matches_played: text("matchesPlayed"),
            goals_scored: text("goalsScored"),
            assists: text("assists"),
            fitness_level: text("fitnessLevel"),
            injury_history,
            fitness_history,
            match_dates,
        }
    }

    /// Read every document of a snapshot, keeping store order.
    pub fn from_snapshot(docs: &[Document]) -> Vec<Self> {
        docs.iter().map(Self::from_document).collect()
    }
}

/// Editable fields of an athlete, as typed into the form.
///
/// Carries no id and no history fields, so saving a draft never overwrites
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AthleteDraft {
    pub name: String,
    pub email: String,
    pub age: String,
    pub sport: String,
    pub matches_played: String,
    pub goals_scored: String,
    pub assists: String,
    pub fitness_level: String,
}

impl AthleteDraft {
    /// Populate a draft from a stored record. The id is left behind.
    pub fn from_record(record: &AthleteRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            age: record.age.clone(),
            sport: record.sport.clone(),
            matches_played: record.matches_played.clone(),
            goals_scored: record.goals_scored.clone(),
            assists: record.assists.clone(),
            fitness_level: record.fitness_level.clone(),
        }
    }

    /// Stored field map.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        for (key, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("age", &self.age),
            ("sport", &self.sport),
            ("matchesPlayed", &self.matches_played),
            ("goalsScored", &self.goals_scored),
            ("assists", &self.assists),
            ("fitnessLevel", &self.fitness_level),
        ] {
            fields.insert(key.to_string(), Value::String(value.clone()));
        }
        fields
    }
}

/// Injury entry as typed into the injury form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjuryDraft {
    pub injury_type: String,
    pub status: InjuryStatus,
}

/// Parse a calendar date string.
///
/// Accepts `yyyy-MM-dd`, RFC 3339 timestamps and naive `yyyy-MM-ddTHH:mm:ss`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}

/// Render a stored value as form text.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> Document {
        Document::new("a1", value.as_object().cloned().unwrap_or_default())
    }

    #[test]
    fn test_lenient_read() {
        let record = AthleteRecord::from_document(&document(json!({
            "name": "Ana",
            "age": 24,
            "injuryHistory": "Sprained ankle",
            "matchDates": ["2025-01-01", 7, "2025-01-02"],
            "fitnessHistory": [{"date": "2025-01-01", "level": "High"}, "garbage"],
        })));

        assert_eq!(record.id, "a1");
        assert_eq!(record.age, "24");
        assert_eq!(record.injury_history, vec![InjuryEntry::Text("Sprained ankle".into())]);
        assert_eq!(record.match_dates.len(), 2);
        assert_eq!(record.fitness_history.len(), 1);
        assert!(record.email.is_empty());
    }

    #[test]
    fn test_draft_from_record_skips_id_and_history() {
        let record = AthleteRecord::from_document(&document(json!({
            "name": "Ana",
            "fitnessHistory": [{"date": "2025-01-01", "level": "High"}],
        })));
        let fields = AthleteDraft::from_record(&record).to_fields();

        assert!(!fields.contains_key("id"));
        assert!(!fields.contains_key("fitnessHistory"));
        assert_eq!(fields["name"], json!("Ana"));
    }

    #[test]
    fn test_fitness_ordinal_defaults_to_one() {
        assert_eq!(fitness_ordinal("Excellent"), 4);
        assert_eq!(fitness_ordinal("excellent"), 1);
        assert_eq!(fitness_ordinal(""), 1);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9);
        assert_eq!(parse_date("2025-03-09"), expected);
        assert_eq!(parse_date("2025-03-09T10:00:00Z"), expected);
        assert_eq!(parse_date("2025-03-09T10:00:00"), expected);
        assert_eq!(parse_date("not a date"), None);
    }
}
