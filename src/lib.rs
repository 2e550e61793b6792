//! AthleteHub - Athlete Management Application
//!
//! A desktop roster manager for coaches and athletes. Live record
//! subscriptions feed derived views (tables, charts, a match heatmap),
//! edits go through a validating gateway that keeps fitness history, and
//! AI scouting reports run through a one-at-a-time enrichment gate.

pub mod athletes;
pub mod auth;
pub mod context;
pub mod enrichment;
pub mod profile;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use athletes::gateway::AthleteGateway;
pub use context::AppContext;
pub use enrichment::gate::EnrichmentGate;
pub use storage::config::AppConfig;
pub use storage::sqlite::SqliteStore;
