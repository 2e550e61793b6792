//! AI scouting reports.
//!
//! - `client`: Gemini REST client
//! - `gate`: one-in-flight gate with per-athlete results
//! - `prompt`: prompt template and response cleanup

pub mod client;
pub mod gate;
pub mod prompt;
pub mod types;

pub use client::GeminiClient;
pub use gate::{EnrichmentGate, TriggerOutcome};
pub use prompt::{build_prompt, clean_response};
pub use types::{EnrichmentError, EnrichmentResult, GateStatus, TextGenerator};
