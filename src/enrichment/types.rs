//! Enrichment types.

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Generative-text errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnrichmentError {
    #[error("No API key configured for the text generator")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited - please try again later")]
    RateLimited,

    #[error("The model returned no text")]
    EmptyResponse,

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EnrichmentError {
    fn from(err: serde_json::Error) -> Self {
        EnrichmentError::SerializationError(err.to_string())
    }
}

/// A text generator: prompt in, text out.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, EnrichmentError>> + Send;
}

/// Gate status. One per session, not per athlete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Stored outcome of one enrichment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentResult {
    Report {
        text: String,
        completed_at: DateTime<Utc>,
    },
    Failed {
        message: String,
        completed_at: DateTime<Utc>,
    },
}

impl EnrichmentResult {
    pub fn is_error(&self) -> bool {
        matches!(self, EnrichmentResult::Failed { .. })
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        match self {
            EnrichmentResult::Report { completed_at, .. }
            | EnrichmentResult::Failed { completed_at, .. } => *completed_at,
        }
    }

    /// Text to display.
    pub fn display_text(&self) -> String {
        match self {
            EnrichmentResult::Report { text, .. } => text.clone(),
            EnrichmentResult::Failed { message, .. } => format!("⚠️ Error: {}", message),
        }
    }
}
