//! Firebase Identity Toolkit REST client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::types::{AuthError, FederatedProvider, IdentityProvider, Session};

/// Default Identity Toolkit base URL.
const DEFAULT_API_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Email/password identity provider.
pub struct FirebaseAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    session: watch::Sender<Option<Session>>,
}

impl FirebaseAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_URL.to_string())
    }

    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let (session, _) = watch::channel(None);

        Self {
            http,
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            session,
        }
    }

    /// Call an `accounts:*` endpoint with email/password credentials.
    async fn password_request(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let api_key = self.api_key.as_deref().ok_or(AuthError::NotConfigured)?;
        let url = format!("{}/accounts:{}", self.base_url, endpoint);

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let code = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_default();
            return Err(map_error_code(&code));
        }

        let body: PasswordResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let session = Session {
            uid: body.local_id,
            email: body.email,
            id_token: body.id_token,
            refresh_token: body.refresh_token,
        };
        self.session.send_replace(Some(session.clone()));
        tracing::info!("Signed in as {}", session.email);
        Ok(session)
    }
}

impl IdentityProvider for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.password_request("signInWithPassword", email, password)
            .await
    }

    async fn sign_in_federated(&self, provider: FederatedProvider) -> Result<Session, AuthError> {
        Err(AuthError::Unsupported(provider.to_string()))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.password_request("signUp", email, password).await
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn on_session_change(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }

    fn sign_out(&self) {
        if self.session.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }
}

/// Map an Identity Toolkit error code to an [`AuthError`].
fn map_error_code(code: &str) -> AuthError {
    // Codes may carry a detail suffix: "WEAK_PASSWORD : Password should be..."
    let (name, detail) = match code.split_once(" : ") {
        Some((name, detail)) => (name.trim(), detail.trim()),
        None => (code.trim(), ""),
    };

    match name {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AuthError::EmailExists,
        "WEAK_PASSWORD" => AuthError::WeakPassword(detail.to_string()),
        "" => AuthError::Provider("request rejected".to_string()),
        other => AuthError::Provider(other.to_string()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
