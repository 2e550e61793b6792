//! Live collection mirror.
//!
//! A [`Subscription`] owns the receiving end of a store subscription and keeps
//! the latest successfully received snapshot. Every snapshot replaces the
//! whole list; nothing is patched incrementally. Errors are logged and the
//! previous list stays visible.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::task::JoinHandle;

use super::document::{Document, SnapshotReceiver};

/// Subscription lifecycle errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Subscription already started")]
    AlreadyStarted,

    #[error("Subscription was stopped and cannot be restarted")]
    Stopped,
}

/// Live mirror of one collection.
pub struct Subscription {
    /// Collection name (for logging)
    collection: String,
    /// Receiver, taken when the delivery task starts
    receiver: Option<SnapshotReceiver>,
    /// Delivery task
    task: Option<JoinHandle<()>>,
    /// Last good snapshot
    latest: Arc<RwLock<Vec<Document>>>,
    /// Number of snapshots applied
    revision: Arc<AtomicU64>,
    /// Cleared on stop so late deliveries are ignored
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Wrap a snapshot receiver for the given collection.
    pub fn new(collection: impl Into<String>, receiver: SnapshotReceiver) -> Self {
        Self {
            collection: collection.into(),
            receiver: Some(receiver),
            task: None,
            latest: Arc::new(RwLock::new(Vec::new())),
            revision: Arc::new(AtomicU64::new(0)),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start delivering snapshots.
    ///
    /// `handler` runs after each snapshot has replaced the local list. Must be
    /// called from within a tokio runtime.
    pub fn start<F>(&mut self, mut handler: F) -> Result<(), SubscriptionError>
    where
        F: FnMut(&[Document]) + Send + 'static,
    {
        if self.task.is_some() {
            return Err(SubscriptionError::AlreadyStarted);
        }
        let mut receiver = self.receiver.take().ok_or(SubscriptionError::Stopped)?;

        self.active.store(true, Ordering::SeqCst);

        let latest = Arc::clone(&self.latest);
        let revision = Arc::clone(&self.revision);
        let active = Arc::clone(&self.active);
        let collection = self.collection.clone();

        self.task = Some(tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                if !active.load(Ordering::SeqCst) {
                    break;
                }

                match event {
                    Ok(documents) => {
                        tracing::debug!(
                            "Snapshot for '{}' with {} documents",
                            collection,
                            documents.len()
                        );
                        {
                            let mut guard = latest.write().unwrap_or_else(|e| e.into_inner());
                            *guard = documents;
                        }
                        revision.fetch_add(1, Ordering::SeqCst);

                        let snapshot = latest.read().unwrap_or_else(|e| e.into_inner()).clone();
                        handler(&snapshot);
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Subscription to '{}' reported an error, keeping last snapshot: {}",
                            collection,
                            e
                        );
                    }
                }
            }
            tracing::debug!("Subscription to '{}' ended", collection);
        }));

        Ok(())
    }

    /// Stop delivering snapshots and release the store subscription.
    pub fn stop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        self.receiver = None;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Whether snapshots are currently being delivered.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) && self.task.is_some()
    }

    /// Copy of the last good snapshot.
    pub fn latest(&self) -> Vec<Document> {
        self.latest.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of snapshots applied so far.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    /// Collection this subscription mirrors.
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}
