//! Storage module: document store, live subscriptions, blobs and configuration.

pub mod blob;
pub mod config;
pub mod document;
pub mod schema;
pub mod sqlite;
pub mod subscription;

pub use blob::{BlobError, BlobRef, BlobStore, LocalBlobStore};
pub use config::{AppConfig, ConfigError, Theme, UiSettings};
pub use document::{
    Document, DocumentPatch, DocumentStore, Fields, SnapshotEvent, SnapshotReceiver, StoreError,
};
pub use sqlite::SqliteStore;
pub use subscription::{Subscription, SubscriptionError};
