//! API request and response types
//!
//! The wire contract of the relay: `{"prompt"}` in, `{"response"}` or
//! `{"error"}` out. Both sides derive both directions so the relay client
//! and the endpoint share these types.

use serde::{Deserialize, Serialize};

/// Request to generate a response for a single prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Successful generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
