//! One-at-a-time gate around the text generator.
//!
//! A single semaphore permit is the busy guard: a trigger that cannot take it
//! is dropped, never queued. Results land in a side table keyed by athlete
//! id, so several reports can be shown while generation stays serialized.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use chrono::Utc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

use super::prompt::build_prompt;
use super::types::{EnrichmentError, EnrichmentResult, GateStatus, TextGenerator};
use crate::athletes::AthleteRecord;

/// What a trigger did.
#[derive(Debug)]
pub enum TriggerOutcome {
    /// Request started; the handle resolves once the result is stored
    Started(JoinHandle<()>),
    /// Another request is in flight
    Dropped,
}

impl TriggerOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, TriggerOutcome::Started(_))
    }
}

struct GateState {
    permit: Arc<Semaphore>,
    status: Mutex<GateStatus>,
    results: Mutex<HashMap<String, EnrichmentResult>>,
}

impl GateState {
    fn set_status(&self, status: GateStatus) {
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }

    fn store_result(&self, athlete_id: String, result: EnrichmentResult) {
        self.results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(athlete_id, result);
    }
}

/// An in-flight request. Holds the permit until a terminal status is set.
///
/// Dropped without [`PendingReport::finish`] (the task panicked or was
/// aborted), it records an error so the gate never sticks in `Loading`.
struct PendingReport {
    state: Weak<GateState>,
    athlete_id: String,
    finished: bool,
    _permit: OwnedSemaphorePermit,
}

impl PendingReport {
    fn finish(mut self, outcome: Result<String, EnrichmentError>) {
        self.finished = true;
        let completed_at = Utc::now();

        let Some(state) = self.state.upgrade() else {
            tracing::debug!("Enrichment for {} finished after teardown", self.athlete_id);
            return;
        };

        match outcome {
            Ok(text) => {
                state.store_result(
                    self.athlete_id.clone(),
                    EnrichmentResult::Report { text, completed_at },
                );
                state.set_status(GateStatus::Success);
            }
            Err(e) => {
                tracing::warn!("Analysis failed for {}: {}", self.athlete_id, e);
                state.store_result(
                    self.athlete_id.clone(),
                    EnrichmentResult::Failed {
                        message: e.to_string(),
                        completed_at,
                    },
                );
                state.set_status(GateStatus::Error);
            }
        }
    }
}

impl Drop for PendingReport {
    // Runs before the permit field is released.
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let Some(state) = self.state.upgrade() else {
            return;
        };

        tracing::error!("Analysis for {} stopped before completing", self.athlete_id);
        state.store_result(
            self.athlete_id.clone(),
            EnrichmentResult::Failed {
                message: "Analysis stopped unexpectedly.".to_string(),
                completed_at: Utc::now(),
            },
        );
        state.set_status(GateStatus::Error);
    }
}

/// Serializes enrichment requests and keeps per-athlete results.
pub struct EnrichmentGate<G> {
    generator: Arc<G>,
    state: Arc<GateState>,
}

impl<G: TextGenerator + 'static> EnrichmentGate<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self {
            generator,
            state: Arc::new(GateState {
                permit: Arc::new(Semaphore::new(1)),
                status: Mutex::new(GateStatus::Idle),
                results: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Request a report for an athlete.
    ///
    /// Uses the record as it is now. Must be called from within a tokio
    /// runtime. If the gate is dropped before the request finishes, the
    /// result is discarded.
    pub fn trigger(&self, record: &AthleteRecord) -> TriggerOutcome {
        let Ok(permit) = Arc::clone(&self.state.permit).try_acquire_owned() else {
            tracing::debug!("Enrichment busy, dropping trigger for {}", record.id);
            return TriggerOutcome::Dropped;
        };

        self.state.set_status(GateStatus::Loading);

        let prompt = build_prompt(record);
        let generator = Arc::clone(&self.generator);
        let pending = PendingReport {
            state: Arc::downgrade(&self.state),
            athlete_id: record.id.clone(),
            finished: false,
            _permit: permit,
        };

        tracing::info!("Requesting scouting report for {}", record.id);

        TriggerOutcome::Started(tokio::spawn(async move {
            let outcome = generator.generate(&prompt).await;
            pending.finish(outcome);
        }))
    }
}

impl<G> EnrichmentGate<G> {
    /// Current gate status.
    pub fn status(&self) -> GateStatus {
        *self.state.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.permit.available_permits() == 0
    }

    /// Result for one athlete.
    pub fn result(&self, athlete_id: &str) -> Option<EnrichmentResult> {
        self.state
            .results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(athlete_id)
            .cloned()
    }

    /// Copy of every stored result.
    pub fn results(&self) -> HashMap<String, EnrichmentResult> {
        self.state
            .results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Remove an athlete's result. Leaves the gate status alone.
    pub fn dismiss(&self, athlete_id: &str) -> Option<EnrichmentResult> {
        self.state
            .results
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(athlete_id)
    }
}
