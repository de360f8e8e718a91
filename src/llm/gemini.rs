//! Google Gemini backend
//!
//! One `generateContent` call per prompt: no system instruction, no history,
//! no tools. The relay forwards each prompt alone.

use super::{GenerateText, GenerationError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upstream request timeout. The hosted API has no timeout of its own on
/// this path, so expiry maps to a network-kind error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiModel {
    Flash15,
    Pro15,
}

impl GeminiModel {
    pub fn api_name(self) -> &'static str {
        match self {
            GeminiModel::Flash15 => "gemini-1.5-flash",
            GeminiModel::Pro15 => "gemini-1.5-pro",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "gemini-1.5-flash" => Some(GeminiModel::Flash15),
            "gemini-1.5-pro" => Some(GeminiModel::Pro15),
            _ => None,
        }
    }
}

/// Configuration for the upstream credential and model selection
#[derive(Debug, Clone, Default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GOOGLE_API_KEY").ok(),
            model: std::env::var("GEMINI_MODEL").ok(),
        }
    }

    /// Resolve the configured model, falling back to the default
    pub fn model(&self) -> GeminiModel {
        self.model
            .as_deref()
            .and_then(GeminiModel::from_name)
            .unwrap_or(GeminiModel::Flash15)
    }
}

/// Gemini service implementation
pub struct GeminiService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiService {
    pub fn new(api_key: String, model: GeminiModel) -> Self {
        let base_url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            model.api_name()
        );
        Self::with_base_url(api_key, base_url)
    }

    /// Construct against an explicit endpoint (used by tests)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn translate_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }

    /// Extract the first candidate's first text part, validating the shape
    /// at the boundary rather than reaching through optional fields.
    fn normalize_response(resp: GeminiResponse) -> Result<String, GenerationError> {
        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::unknown("No candidates in response"))?;

        let part = candidate
            .content
            .parts
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::unknown("Candidate has no content parts"))?;

        Ok(part.text)
    }
}

#[async_trait]
impl GenerateText for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = Self::translate_request(prompt);
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {e}"))
                } else {
                    GenerationError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                let message = error_resp.error.message;
                return Err(match status.as_u16() {
                    400 => GenerationError::invalid_request(format!("Invalid request: {message}")),
                    401 | 403 => GenerationError::auth(format!("Authentication failed: {message}")),
                    429 => GenerationError::rate_limit(format!("Rate limit exceeded: {message}")),
                    500..=599 => GenerationError::server_error(format!("Server error: {message}")),
                    _ => GenerationError::unknown(format!("HTTP {status}: {message}")),
                });
            }
            return Err(GenerationError::unknown(format!(
                "HTTP {status} error: {body}"
            )));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(gemini_response)
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationErrorKind;

    #[test]
    fn test_translate_request_single_user_turn() {
        let req = GeminiService::translate_request("hello");
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [{"text": "hello"}]
                }]
            })
        );
    }

    #[test]
    fn test_normalize_takes_first_candidate_first_part() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": "Hi there"}, {"text": "ignored"}]}},
                    {"content": {"role": "model", "parts": [{"text": "also ignored"}]}}
                ]
            }"#,
        )
        .unwrap();

        let text = GeminiService::normalize_response(resp).unwrap();
        assert_eq!(text, "Hi there");
    }

    #[test]
    fn test_normalize_rejects_empty_candidates() {
        let resp: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let err = GeminiService::normalize_response(resp).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::Unknown);
    }

    #[test]
    fn test_normalize_rejects_partless_candidate() {
        let resp: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert!(GeminiService::normalize_response(resp).is_err());
    }

    #[test]
    fn test_config_model_fallback() {
        let config = GeminiConfig {
            api_key: Some("k".to_string()),
            model: Some("not-a-model".to_string()),
        };
        assert_eq!(config.model(), GeminiModel::Flash15);

        let config = GeminiConfig {
            api_key: None,
            model: Some("gemini-1.5-pro".to_string()),
        };
        assert_eq!(config.model(), GeminiModel::Pro15);
    }

    async fn spawn_upstream(router: axum::Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_generate_against_stub_upstream() {
        let router = axum::Router::new().route(
            "/generate",
            axum::routing::post(|| async {
                axum::Json(serde_json::json!({
                    "candidates": [
                        {"content": {"role": "model", "parts": [{"text": "Hi there"}]}}
                    ]
                }))
            }),
        );
        let addr = spawn_upstream(router).await;

        let service =
            GeminiService::with_base_url("test-key".to_string(), format!("http://{addr}/generate"));
        let text = service.generate("hello").await.unwrap();
        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn test_generate_maps_rate_limit_status() {
        let router = axum::Router::new().route(
            "/generate",
            axum::routing::post(|| async {
                (
                    axum::http::StatusCode::TOO_MANY_REQUESTS,
                    axum::Json(serde_json::json!({
                        "error": {"message": "quota exhausted", "code": 429, "status": "RESOURCE_EXHAUSTED"}
                    })),
                )
            }),
        );
        let addr = spawn_upstream(router).await;

        let service =
            GeminiService::with_base_url("test-key".to_string(), format!("http://{addr}/generate"));
        let err = service.generate("hello").await.unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::RateLimit);
    }
}
