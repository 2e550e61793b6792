//! Gemini `generateContent` client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::prompt::clean_response;
use super::types::{EnrichmentError, TextGenerator};

/// Default API base URL.
const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1";

/// Sampling temperature.
const TEMPERATURE: f32 = 0.7;

/// Nucleus sampling threshold.
const TOP_P: f32 = 0.9;

/// Generative-text client for the Gemini REST API.
pub struct GeminiClient {
    /// HTTP client
    http: reqwest::Client,
    /// Base URL for API
    base_url: String,
    /// API key, sent as the `key` query parameter
    api_key: Option<String>,
    /// Model name
    model: String,
}

impl GeminiClient {
    /// Create a client for the given model.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_API_URL.to_string())
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: String,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            base_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
        }
    }

    /// Whether an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, EnrichmentError> {
        let api_key = self.api_key.as_deref().ok_or(EnrichmentError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| EnrichmentError::Network(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            let parsed: GenerateResponse = response
                .json()
                .await
                .map_err(|e| EnrichmentError::SerializationError(e.to_string()))?;

            let text = parsed.text();
            if text.trim().is_empty() {
                return Err(EnrichmentError::EmptyResponse);
            }
            Ok(clean_response(&text))
        } else if status.as_u16() == 429 {
            Err(EnrichmentError::RateLimited)
        } else {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("API returned status {}", status));
            Err(EnrichmentError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
