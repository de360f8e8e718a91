//! Generation client against the relay endpoint
//!
//! Speaks the same-origin relay contract: `POST /generate-content` with
//! `{"prompt": ...}`, reading `{"response": ...}`. The upstream credential
//! never reaches this side of the wire.

use crate::api::{GenerateRequest, GenerateResponse};
use crate::llm::{GenerateText, GenerationError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the relay's generation endpoint
pub struct RelayClient {
    client: Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: format!("{}/generate-content", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl GenerateText for RelayClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            prompt: prompt.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
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
            return Err(match status.as_u16() {
                429 => GenerationError::rate_limit(format!("HTTP {status}: {body}")),
                500..=599 => GenerationError::server_error(format!("HTTP {status}: {body}")),
                _ => GenerationError::unknown(format!("HTTP {status}: {body}")),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::unknown(format!("Malformed relay response: {e} - body: {body}"))
        })?;

        Ok(parsed.response)
    }
}
