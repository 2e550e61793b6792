//! Role lookup after sign-in.

use serde_json::Value;

use super::types::Role;
use crate::storage::{DocumentStore, StoreError};

/// Collection holding user profiles, keyed by uid.
pub const USERS: &str = "users";

/// Where a signed-in user should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleResolution {
    Resolved(Role),
    /// The stored role is not one we know; back to sign-in
    Unrecognized(String),
}

/// Look up a user's role.
///
/// A missing user document or missing role means Athlete.
pub async fn resolve_role<S: DocumentStore>(
    store: &S,
    uid: &str,
) -> Result<RoleResolution, StoreError> {
    let Some(doc) = store.get_document(USERS, uid).await? else {
        tracing::debug!("No user document for {}, defaulting to athlete", uid);
        return Ok(RoleResolution::Resolved(Role::Athlete));
    };

    match doc.get("role") {
        None | Some(Value::Null) => Ok(RoleResolution::Resolved(Role::Athlete)),
        Some(Value::String(role)) if role.is_empty() => Ok(RoleResolution::Resolved(Role::Athlete)),
        Some(Value::String(role)) => Ok(Role::parse(role)
            .map(RoleResolution::Resolved)
            .unwrap_or_else(|| {
                tracing::warn!("Unknown role '{}' for {}", role, uid);
                RoleResolution::Unrecognized(role.clone())
            })),
        Some(other) => {
            tracing::warn!("Unknown role {} for {}", other, uid);
            Ok(RoleResolution::Unrecognized(other.to_string()))
        }
    }
}
