//! User profile management.
//!
//! Provides profile creation on sign-up, updates, drafts and picture upload.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};

use super::completion::profile_completion;
use super::types::{SocialPlatform, UserProfile};
use crate::auth::{Role, USERS};
use crate::storage::{BlobError, BlobRef, BlobStore, DocumentPatch, DocumentStore, Fields, StoreError};

/// Profile manager for user profiles.
pub struct ProfileManager<S, B> {
    store: Arc<S>,
    blobs: Arc<B>,
}

impl<S, B> Clone for ProfileManager<S, B> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            blobs: Arc::clone(&self.blobs),
        }
    }
}

impl<S: DocumentStore, B: BlobStore> ProfileManager<S, B> {
    /// Create a new profile manager.
    pub fn new(store: Arc<S>, blobs: Arc<B>) -> Self {
        Self { store, blobs }
    }

    /// Load a profile, `None` if the user has no document.
    pub async fn load(&self, uid: &str) -> Result<Option<UserProfile>, ProfileError> {
        let doc = self.store.get_document(USERS, uid).await?;
        Ok(doc.as_ref().map(UserProfile::from_document))
    }

    /// Create the user document for a new account.
    pub async fn create(
        &self,
        uid: &str,
        name: &str,
        email: &str,
        role: Role,
    ) -> Result<UserProfile, ProfileError> {
        let profile = UserProfile::new(uid, name.trim(), email.trim(), role);

        let mut fields = Fields::new();
        fields.insert("name".into(), json!(profile.name));
        fields.insert("email".into(), json!(profile.email));
        fields.insert("role".into(), json!(role.as_str()));
        fields.insert("additionalDetails".into(), profile.additional_details());

        self.store.set_document(USERS, uid, fields).await?;
        tracing::info!("Created {} profile for {}", role.as_str(), uid);
        Ok(profile)
    }

    /// Write name and details. Social links are checked first.
    ///
    /// Returns the new completion score.
    pub async fn update(&self, profile: &UserProfile) -> Result<u8, ProfileError> {
        if let Some(platform) = profile.social_links.first_invalid() {
            return Err(ProfileError::InvalidSocialLink(platform));
        }

        let patch = DocumentPatch::new()
            .set("name", json!(profile.name))
            .set("additionalDetails", profile.additional_details());
        self.store
            .update_document(USERS, &profile.uid, patch)
            .await
            .map_err(|e| {
                tracing::warn!("Error updating profile: {}", e);
                e
            })?;

        Ok(profile_completion(profile))
    }

    /// Save the current edits as a draft without touching the live fields.
    pub async fn save_draft(&self, profile: &UserProfile) -> Result<(), ProfileError> {
        let draft = json!({
            "name": profile.name,
            "additionalDetails": profile.additional_details(),
            "savedAt": Utc::now().to_rfc3339(),
        });
        self.store
            .update_document(USERS, &profile.uid, DocumentPatch::new().set("draft", draft))
            .await
            .map_err(|e| {
                tracing::warn!("Error saving draft: {}", e);
                e
            })?;
        Ok(())
    }

    /// Upload a profile picture and store its URL on the profile.
    pub async fn upload_picture(&self, uid: &str, bytes: Vec<u8>) -> Result<String, ProfileError> {
        let blob: BlobRef = self
            .blobs
            .upload(&format!("profile_pictures/{}", uid), bytes)
            .await?;
        let url = self.blobs.public_url(&blob)?;

        self.store
            .update_document(USERS, uid, DocumentPatch::new().set("photoURL", Value::String(url.clone())))
            .await?;
        tracing::info!("Updated profile picture for {}", uid);
        Ok(url)
    }
}

/// Profile errors.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid {0} URL format!")]
    InvalidSocialLink(SocialPlatform),

    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    #[error("Upload failed: {0}")]
    Blob(#[from] BlobError),
}
