//! Side effects requested by state transitions
//!
//! The transition function is pure; effects describe the I/O the session
//! driver must perform after applying the new state.

/// Effect to execute after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one upstream generation call for this prompt
    RequestGeneration { request_id: u64, prompt: String },
    /// Scroll the display to the newest turn
    ScrollToBottom,
}

impl Effect {
    pub fn request_generation(request_id: u64, prompt: impl Into<String>) -> Self {
        Effect::RequestGeneration {
            request_id,
            prompt: prompt.into(),
        }
    }
}
