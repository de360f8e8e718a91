//! HTTP API for the chat relay

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
pub use types::{ErrorResponse, GenerateRequest, GenerateResponse};

use crate::llm::GenerateText;
use std::sync::Arc;

/// Application state shared across handlers
///
/// The generation backend is constructed at startup and injected here;
/// handlers never reach for process-wide state by name.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no upstream credential is configured; the endpoint then
    /// answers every generation request with the failure contract.
    pub generator: Option<Arc<dyn GenerateText>>,
}

impl AppState {
    pub fn new(generator: Option<Arc<dyn GenerateText>>) -> Self {
        Self { generator }
    }
}
