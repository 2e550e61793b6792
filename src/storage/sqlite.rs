//! SQLite-backed document store.
//!
//! Stores each document as a JSON body keyed by (collection, id) and pushes a
//! full collection snapshot to every subscriber after each write. Lock order
//! is subscribers, then connection.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::document::{
    apply_patch, Document, DocumentPatch, DocumentStore, Fields, SnapshotEvent, SnapshotReceiver,
    StoreError,
};
use super::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};

type Subscribers = HashMap<String, Vec<mpsc::UnboundedSender<SnapshotEvent>>>;

/// Document store over a single SQLite connection.
///
/// Queries behind the async trait methods run on the blocking pool.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    subscribers: Arc<Mutex<Subscribers>>,
}

impl SqliteStore {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::with_connection(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        initialize(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            subscribers: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Run a closure against the locked connection on the calling thread.
    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        f(&conn)
    }

    /// Run a closure against the locked connection on the blocking pool.
    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap_or_else(|e| e.into_inner());
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::QueryFailed(format!("store task failed: {}", e)))?
    }

    /// Push a fresh snapshot of a collection to its subscribers.
    ///
    /// Closed receivers are pruned.
    async fn notify(&self, collection: &str) {
        let conn = Arc::clone(&self.conn);
        let subscribers = Arc::clone(&self.subscribers);
        let collection = collection.to_string();

        let result = tokio::task::spawn_blocking(move || {
            let mut subscribers = subscribers.lock().unwrap_or_else(|e| e.into_inner());
            let Some(senders) = subscribers.get_mut(&collection) else {
                return;
            };

            let snapshot = {
                let conn = conn.lock().unwrap_or_else(|e| e.into_inner());
                load_collection(&conn, &collection)
            };
            senders.retain(|tx| tx.send(snapshot.clone()).is_ok());

            if senders.is_empty() {
                subscribers.remove(&collection);
            }
        })
        .await;

        if let Err(e) = result {
            tracing::error!("Snapshot push failed: {}", e);
        }
    }

    /// Number of open subscriptions for a collection.
    pub fn subscriber_count(&self, collection: &str) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(collection)
            .map(|senders| senders.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

impl DocumentStore for SqliteStore {
    fn subscribe(&self, collection: &str) -> Result<SnapshotReceiver, StoreError> {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());

        let (tx, rx) = mpsc::unbounded_channel();
        let initial = self.with_conn(|conn| load_collection(conn, collection));
        // The receiver is held locally, so this cannot fail.
        let _ = tx.send(initial);

        subscribers
            .entry(collection.to_string())
            .or_default()
            .push(tx);

        tracing::debug!("New subscription to '{}'", collection);
        Ok(rx)
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let (collection, id) = (collection.to_string(), id.to_string());
        self.run(move |conn| read_document(conn, &collection, &id))
            .await
    }

    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let body = encode_body(fields)?;
        let now = Utc::now().to_rfc3339();

        let (owned_collection, owned_id) = (collection.to_string(), id.clone());
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, body_json, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![owned_collection, owned_id, body, now],
            )?;
            Ok(())
        })
        .await?;

        self.notify(collection).await;
        Ok(id)
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let body = encode_body(fields)?;
        let now = Utc::now().to_rfc3339();

        let (owned_collection, id) = (collection.to_string(), id.to_string());
        self.run(move |conn| {
            conn.execute(
                "INSERT INTO documents (collection, id, body_json, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(collection, id) DO UPDATE SET
                    body_json = excluded.body_json,
                    updated_at = excluded.updated_at",
                params![owned_collection, id, body, now],
            )?;
            Ok(())
        })
        .await?;

        self.notify(collection).await;
        Ok(())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: DocumentPatch,
    ) -> Result<(), StoreError> {
        let (owned_collection, id) = (collection.to_string(), id.to_string());
        self.run(move |conn| {
            let mut document = read_document(conn, &owned_collection, &id)?.ok_or_else(|| {
                StoreError::NotFound {
                    collection: owned_collection.clone(),
                    id: id.clone(),
                }
            })?;

            apply_patch(&mut document.fields, patch);
            let body = encode_body(document.fields)?;

            conn.execute(
                "UPDATE documents SET body_json = ?1, updated_at = ?2
                 WHERE collection = ?3 AND id = ?4",
                params![body, Utc::now().to_rfc3339(), owned_collection, id],
            )?;
            Ok(())
        })
        .await?;

        self.notify(collection).await;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let (owned_collection, id) = (collection.to_string(), id.to_string());
        let deleted = self
            .run(move |conn| {
                Ok(conn.execute(
                    "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                    params![owned_collection, id],
                )?)
            })
            .await?;

        if deleted > 0 {
            self.notify(collection).await;
        }
        Ok(())
    }
}

/// Create the schema if needed.
fn initialize(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_VERSION_TABLE)
        .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

    let result: SqliteResult<i32> = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    );
    let current_version = match result {
        Ok(version) => version,
        Err(rusqlite::Error::QueryReturnedNoRows) => 0,
        Err(e) => return Err(StoreError::QueryFailed(e.to_string())),
    };

    if current_version < CURRENT_VERSION {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
            [CURRENT_VERSION],
        )?;

        tracing::info!("Document store migrated to version {}", CURRENT_VERSION);
    }

    Ok(())
}

fn load_collection(conn: &Connection, collection: &str) -> Result<Vec<Document>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, body_json FROM documents WHERE collection = ?1 ORDER BY rowid ASC",
    )?;

    let rows = stmt.query_map(params![collection], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut documents = Vec::new();
    for row in rows {
        let (id, body) = row?;
        documents.push(Document::new(id, decode_body(&body)?));
    }
    Ok(documents)
}

fn read_document(
    conn: &Connection,
    collection: &str,
    id: &str,
) -> Result<Option<Document>, StoreError> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body_json FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;

    match body {
        Some(body) => Ok(Some(Document::new(id, decode_body(&body)?))),
        None => Ok(None),
    }
}

fn encode_body(mut fields: Fields) -> Result<String, StoreError> {
    // The id lives in its own column, never inside the body.
    fields.remove("id");
    Ok(serde_json::to_string(&Value::Object(fields))?)
}

fn decode_body(body: &str) -> Result<Fields, StoreError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Object(fields) => Ok(fields),
        other => Err(StoreError::SerializationError(format!(
            "document body is not an object: {}",
            other
        ))),
    }
}
