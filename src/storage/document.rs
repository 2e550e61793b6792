//! Document store contract.
//!
//! The roster and user profiles live in a document database addressed by
//! collection name and opaque string id. This module defines the shape of a
//! document, the write patch used for merge-with-append updates, and the
//! [`DocumentStore`] trait the rest of the crate talks to.

use std::future::Future;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::mpsc;

/// Field map of a single document.
pub type Fields = Map<String, Value>;

/// A stored document: the store-assigned id plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Opaque id assigned by the store
    pub id: String,
    /// Document fields (never contains the id)
    pub fields: Fields,
}

impl Document {
    /// Create a document from an id and a field map.
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Get a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Result pushed to subscribers: a full collection snapshot or an error.
pub type SnapshotEvent = Result<Vec<Document>, StoreError>;

/// Receiving half of a collection subscription.
pub type SnapshotReceiver = mpsc::UnboundedReceiver<SnapshotEvent>;

/// A single update applied to an existing document.
///
/// `set` fields are merged over the stored document (top-level keys replace).
/// `append` entries are pushed onto array fields in the same write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    /// Top-level fields to overwrite
    pub set: Fields,
    /// (field, value) pairs to append to array fields
    pub append: Vec<(String, Value)>,
}

impl DocumentPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the given fields over the document.
    pub fn set_fields(mut self, fields: Fields) -> Self {
        self.set.extend(fields);
        self
    }

    /// Set a single field.
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.set.insert(field.into(), value);
        self
    }

    /// Append a value to an array field.
    pub fn append(mut self, field: impl Into<String>, value: Value) -> Self {
        self.append.push((field.into(), value));
        self
    }

    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.append.is_empty()
    }
}

/// Document store errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Subscription closed")]
    SubscriptionClosed,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::QueryFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerializationError(err.to_string())
    }
}

/// Trait for document store implementations.
///
/// Consistency, durability and conflict handling belong to the store; callers
/// only issue these calls and react to the results.
pub trait DocumentStore: Send + Sync {
    /// Open a live subscription to a collection.
    ///
    /// The receiver gets the current snapshot first and a fresh full snapshot
    /// after every change to the collection.
    fn subscribe(&self, collection: &str) -> Result<SnapshotReceiver, StoreError>;

    /// Read one document, `None` if it does not exist.
    fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Create a document with a store-assigned id and return the id.
    fn create_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;

    /// Create or replace a document under a caller-chosen id.
    fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Apply a patch to an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] if the document is gone.
    fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: DocumentPatch,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a document. Deleting a missing document is not an error.
    fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Append one value to an array field of an existing document.
    fn append_to_array_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        self.update_document(collection, id, DocumentPatch::new().append(field, value))
    }
}

/// Apply a patch to a field map in place.
///
/// Appending to a missing or null field creates the array. Appending to a
/// field holding a non-empty scalar keeps the scalar as the first element.
pub fn apply_patch(fields: &mut Fields, patch: DocumentPatch) {
    fields.extend(patch.set);

    for (field, value) in patch.append {
        match fields.get_mut(&field) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) if !is_blank(existing) => {
                let legacy = existing.take();
                *existing = Value::Array(vec![legacy, value]);
            }
            _ => {
                fields.insert(field, Value::Array(vec![value]));
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
