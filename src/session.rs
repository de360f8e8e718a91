//! Chat session driver
//!
//! Owns the conversation state and wires the pure state machine to its
//! collaborators: a generation backend and the platform capabilities.
//! Requests are serialized; `submit` runs the full submission/completion
//! cycle before returning.

use crate::conversation::{transition, ChatState, Effect, Event, TransitionError, Turn};
use crate::llm::GenerateText;
use crate::platform::Platform;
use std::sync::Arc;

/// One user-facing conversation session
pub struct ChatSession {
    state: ChatState,
    generator: Arc<dyn GenerateText>,
    platform: Arc<dyn Platform>,
}

impl ChatSession {
    pub fn new(generator: Arc<dyn GenerateText>, platform: Arc<dyn Platform>) -> Self {
        Self {
            state: ChatState::new(),
            generator,
            platform,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    pub fn turns(&self) -> &[Turn] {
        &self.state.turns
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Update the input buffer (mirrors typing into the prompt box)
    pub fn set_input(&mut self, text: impl Into<String>) {
        // InputChanged cannot be rejected.
        let _ = self.apply(Event::InputChanged { text: text.into() });
    }

    /// Submit a prompt and drive it to completion or failure
    ///
    /// The user turn is appended before the upstream call; a failed call
    /// leaves it in place and appends the placeholder turn. A rejected
    /// submission (blank prompt, request already in flight) is surfaced as
    /// a platform warning and returned to the caller.
    pub async fn submit(&mut self, text: &str) -> Result<(), TransitionError> {
        let effects = match self.apply(Event::Submit {
            text: text.to_string(),
        }) {
            Ok(effects) => effects,
            Err(e) => {
                self.platform.warn(&e.to_string());
                return Err(e);
            }
        };

        for effect in effects {
            match effect {
                Effect::ScrollToBottom => self.platform.scroll_to_bottom(),
                Effect::RequestGeneration { request_id, prompt } => {
                    self.run_generation(request_id, &prompt).await;
                }
            }
        }

        Ok(())
    }

    /// Copy a turn's message to the clipboard, best effort
    pub fn copy_turn(&self, index: usize) {
        if let Some(turn) = self.state.turns.get(index) {
            self.platform.copy_to_clipboard(&turn.message);
        }
    }

    /// Read a turn's message aloud, best effort
    pub fn speak_turn(&self, index: usize) {
        if let Some(turn) = self.state.turns.get(index) {
            self.platform.speak(&turn.message);
        }
    }

    /// Share a turn's message through the native share sheet, best effort
    pub fn share_turn(&self, index: usize) {
        if let Some(turn) = self.state.turns.get(index) {
            self.platform.share(&turn.message);
        }
    }

    async fn run_generation(&mut self, request_id: u64, prompt: &str) {
        let event = match self.generator.generate(prompt).await {
            Ok(text) => Event::GenerationComplete { request_id, text },
            Err(error) => {
                tracing::warn!(
                    kind = error.kind.as_str(),
                    error = %error.message,
                    "generation failed, appending placeholder turn"
                );
                Event::GenerationFailed { request_id, error }
            }
        };

        // The id always matches the in-flight request here, so the
        // transition cannot be rejected.
        if let Ok(effects) = self.apply(event) {
            for effect in effects {
                if matches!(effect, Effect::ScrollToBottom) {
                    self.platform.scroll_to_bottom();
                }
            }
        }
    }

    fn apply(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let result = transition(&self.state, event)?;
        self.state = result.new_state;
        Ok(result.effects)
    }
}
