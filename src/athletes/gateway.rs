//! Record mutation gateway.
//!
//! Every write to the athletes collection goes through [`AthleteGateway`].
//! Drafts are validated before any store call. Updates read the stored
//! document first and append the pre-update fitness level to fitnessHistory
//! in the same write as the new fields.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use thiserror::Error;

use super::types::{value_text, AthleteDraft, AthleteRecord, InjuryDraft, InjuryEntry};
use super::validation::{validate_draft, ValidationError};
use crate::storage::{DocumentPatch, DocumentStore, StoreError, Subscription};

/// Collection holding the roster.
pub const ATHLETES: &str = "athletes";

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New document with its store-assigned id
    Created(String),
    /// Existing document updated and history appended
    Updated,
    /// The edited document was gone; nothing was written
    LostUpdate,
}

/// Save errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to save athlete: {0}")]
    Remote(#[from] StoreError),
}

/// Injury update errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InjuryError {
    #[error("Please enter the injury type.")]
    MissingType,

    #[error("Failed to record injury: {0}")]
    Remote(#[from] StoreError),
}

/// Form state of the roster editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AthleteForm {
    pub draft: AthleteDraft,
    /// Id of the record being edited, `None` when creating
    pub editing_id: Option<String>,
}

impl AthleteForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a record for editing.
    pub fn begin_edit(&mut self, record: &AthleteRecord) {
        self.draft = AthleteDraft::from_record(record);
        self.editing_id = Some(record.id.clone());
    }

    /// Back to an empty create form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// React to a finished save: reset on success, keep the input on error.
    pub fn apply_outcome(&mut self, result: &Result<SaveOutcome, SaveError>) {
        if result.is_ok() {
            self.reset();
        }
    }
}

/// Writes to the athletes collection.
pub struct AthleteGateway<S> {
    store: Arc<S>,
}

impl<S> Clone for AthleteGateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> AthleteGateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Open a live subscription to the roster.
    pub fn subscribe(&self) -> Result<Subscription, StoreError> {
        let receiver = self.store.subscribe(ATHLETES)?;
        Ok(Subscription::new(ATHLETES, receiver))
    }

    /// Save a draft, dating any history entry today (UTC).
    pub async fn save(
        &self,
        draft: &AthleteDraft,
        editing_id: Option<&str>,
    ) -> Result<SaveOutcome, SaveError> {
        self.save_at(draft, editing_id, Utc::now().date_naive()).await
    }

    /// Save a draft with an explicit history date.
    pub async fn save_at(
        &self,
        draft: &AthleteDraft,
        editing_id: Option<&str>,
        today: NaiveDate,
    ) -> Result<SaveOutcome, SaveError> {
        validate_draft(draft)?;

        let outcome = match editing_id {
            Some(id) => self.update(draft, id, today).await,
            None => self.create(draft).await,
        };

        if let Err(e) = &outcome {
            tracing::warn!("Error saving athlete: {}", e);
        }
        outcome
    }

    /// Save the form and reset it on success.
    pub async fn submit(&self, form: &mut AthleteForm) -> Result<SaveOutcome, SaveError> {
        let result = self.save(&form.draft, form.editing_id.as_deref()).await;
        form.apply_outcome(&result);
        result
    }

    async fn create(&self, draft: &AthleteDraft) -> Result<SaveOutcome, SaveError> {
        let mut fields = draft.to_fields();
        fields.insert("fitnessHistory".to_string(), Value::Array(Vec::new()));

        let id = self.store.create_document(ATHLETES, fields).await?;
        tracing::info!("Created athlete {}", id);
        Ok(SaveOutcome::Created(id))
    }

    async fn update(
        &self,
        draft: &AthleteDraft,
        id: &str,
        today: NaiveDate,
    ) -> Result<SaveOutcome, SaveError> {
        let Some(current) = self.store.get_document(ATHLETES, id).await? else {
            tracing::warn!("Athlete {} was deleted while being edited; update dropped", id);
            return Ok(SaveOutcome::LostUpdate);
        };

        let previous_level = current.get("fitnessLevel").map(value_text).unwrap_or_default();
        let patch = DocumentPatch::new().set_fields(draft.to_fields()).append(
            "fitnessHistory",
            serde_json::json!({
                "date": today.format("%Y-%m-%d").to_string(),
                "level": previous_level,
            }),
        );

        self.store.update_document(ATHLETES, id, patch).await?;
        tracing::info!("Updated athlete {}", id);
        Ok(SaveOutcome::Updated)
    }

    /// Delete an athlete. Irreversible.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete_document(ATHLETES, id).await.map_err(|e| {
            tracing::warn!("Error deleting athlete {}: {}", id, e);
            e
        })?;
        tracing::info!("Deleted athlete {}", id);
        Ok(())
    }

    /// Append one injury to an athlete's history.
    pub async fn record_injury(&self, id: &str, injury: &InjuryDraft) -> Result<(), InjuryError> {
        let injury_type = injury.injury_type.trim();
        if injury_type.is_empty() {
            return Err(InjuryError::MissingType);
        }

        let entry = InjuryEntry::Detail {
            injury_type: injury_type.to_string(),
            status: injury.status,
        };
        self.store
            .append_to_array_field(ATHLETES, id, "injuryHistory", entry.to_value())
            .await
            .map_err(|e| {
                tracing::warn!("Error recording injury for {}: {}", id, e);
                InjuryError::Remote(e)
            })
    }
}
