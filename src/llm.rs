//! Text generation abstraction
//!
//! The hosted model is treated as an opaque `text -> text` capability.
//! Both the upstream Gemini service and the relay client implement the same
//! trait, so the session driver never knows which side of the wire it is on.

mod error;
mod gemini;

pub use error::{GenerationError, GenerationErrorKind};
pub use gemini::{GeminiConfig, GeminiModel, GeminiService};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for text generation backends
#[async_trait]
pub trait GenerateText: Send + Sync {
    /// Generate a response for a single prompt, with no prior history
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Logging wrapper for generation backends
pub struct LoggingGenerator {
    inner: Arc<dyn GenerateText>,
    label: &'static str,
}

impl LoggingGenerator {
    pub fn new(inner: Arc<dyn GenerateText>, label: &'static str) -> Self {
        Self { inner, label }
    }
}

#[async_trait]
impl GenerateText for LoggingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(text) => {
                tracing::info!(
                    backend = self.label,
                    duration_ms = %duration.as_millis(),
                    prompt_chars = prompt.len(),
                    response_chars = text.len(),
                    "generation completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    backend = self.label,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "generation failed"
                );
            }
        }

        result
    }
}
