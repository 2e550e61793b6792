//! Mock backends for integration tests.
//!
//! `MockStore` keeps documents in memory, counts every call and can be told
//! to fail one kind of call;
//! `MockGenerator` blocks until released so tests can observe the gate while
//! a request is in flight.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use athletehub::enrichment::{EnrichmentError, TextGenerator};
use athletehub::storage::document::apply_patch;
use athletehub::storage::{
    Document, DocumentPatch, DocumentStore, Fields, SnapshotReceiver, StoreError,
};
use tokio::sync::Notify;

/// Store calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Get,
    Create,
    Update,
    Delete,
}

/// In-memory document store that counts reads and writes.
#[derive(Default)]
pub struct MockStore {
    documents: Mutex<HashMap<(String, String), Fields>>,
    next_id: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_on: Option<StoreOp>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every `op` call returns a connection error.
    /// Failed calls are still counted.
    pub fn failing_on(op: StoreOp) -> Self {
        Self {
            fail_on: Some(op),
            ..Self::default()
        }
    }

    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if self.fail_on == Some(op) {
            return Err(StoreError::ConnectionFailed(format!("{:?} unavailable", op)));
        }
        Ok(())
    }

    /// Seed a document without counting it as a call.
    pub fn insert(&self, collection: &str, id: &str, fields: Fields) {
        self.documents
            .lock()
            .unwrap()
            .insert((collection.to_string(), id.to_string()), fields);
    }

    pub fn fields(&self, collection: &str, id: &str) -> Option<Fields> {
        self.documents
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.reads() + self.writes()
    }

    fn key(collection: &str, id: &str) -> (String, String) {
        (collection.to_string(), id.to_string())
    }
}

impl DocumentStore for MockStore {
    fn subscribe(&self, _collection: &str) -> Result<SnapshotReceiver, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();
        Ok(rx)
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check(StoreOp::Get)?;
        Ok(self.fields(collection, id).map(|fields| Document::new(id, fields)))
    }

    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(StoreOp::Create)?;
        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.insert(collection, &id, fields);
        Ok(id)
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.insert(collection, id, fields);
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: DocumentPatch,
    ) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(StoreOp::Update)?;
        let mut documents = self.documents.lock().unwrap();
        let fields = documents
            .get_mut(&Self::key(collection, id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        apply_patch(fields, patch);
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(StoreOp::Delete)?;
        self.documents.lock().unwrap().remove(&Self::key(collection, id));
        Ok(())
    }
}

/// Text generator that waits for [`MockGenerator::release`] before replying.
pub struct MockGenerator {
    reply: Result<String, EnrichmentError>,
    panics: bool,
    calls: AtomicUsize,
    gate: Notify,
}

impl MockGenerator {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Ok(text.to_string()))
    }

    pub fn failing(error: EnrichmentError) -> Self {
        Self::with_reply(Err(error))
    }

    /// Generator that panics as soon as it is called.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::with_reply(Ok(String::new()))
        }
    }

    fn with_reply(reply: Result<String, EnrichmentError>) -> Self {
        Self {
            reply,
            panics: false,
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
        }
    }

    /// Let one pending (or the next) request finish.
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("generator crashed");
        }
        self.gate.notified().await;
        self.reply.clone()
    }
}
