//! Identity types and the provider contract.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Provider user id
    pub uid: String,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
}

/// Account role, stored as `role` on the user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Athlete,
    Coach,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Athlete, Role::Coach];

    /// Parse a stored role string.
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "athlete" => Some(Role::Athlete),
            "coach" => Some(Role::Coach),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Athlete => "athlete",
            Role::Coach => "coach",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Athlete => write!(f, "Athlete"),
            Role::Coach => write!(f, "Coach"),
        }
    }
}

/// Federated sign-in providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

impl std::fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FederatedProvider::Google => write!(f, "Google"),
        }
    }
}

/// Authentication errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("No API key configured for the identity provider")]
    NotConfigured,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailExists,

    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    #[error("{0} sign-in is not supported on this platform")]
    Unsupported(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// Identity provider contract.
///
/// The application only reacts to session changes; it does not implement
/// authentication itself.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_in_federated(
        &self,
        provider: FederatedProvider,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn current_session(&self) -> Option<Session>;

    /// Receiver that observes every session change.
    fn on_session_change(&self) -> watch::Receiver<Option<Session>>;

    fn sign_out(&self);
}
