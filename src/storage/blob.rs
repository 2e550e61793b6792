//! Blob storage for profile pictures.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Reference to an uploaded blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    /// Store-relative path
    pub path: String,
}

/// Blob storage errors.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Invalid blob path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Trait for blob store implementations.
pub trait BlobStore: Send + Sync {
    /// Upload bytes under a store-relative path, replacing any existing blob.
    fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
    ) -> impl Future<Output = Result<BlobRef, BlobError>> + Send;

    /// Public URL for an uploaded blob.
    fn public_url(&self, blob: &BlobRef) -> Result<String, BlobError>;
}

/// Blob store writing files under a local directory.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a blob store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a store-relative path, rejecting anything that escapes the root.
    fn resolve(&self, path: &str) -> Result<PathBuf, BlobError> {
        let relative = Path::new(path);
        let is_plain = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

        if !is_plain {
            return Err(BlobError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for LocalBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<BlobRef, BlobError> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::IoError(e.to_string()))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| BlobError::IoError(e.to_string()))?;

        tracing::info!("Stored blob {}", target.display());
        Ok(BlobRef {
            path: path.to_string(),
        })
    }

    fn public_url(&self, blob: &BlobRef) -> Result<String, BlobError> {
        let target = self.resolve(&blob.path)?;
        Ok(format!("file://{}", target.display()))
    }
}
