//! Pure state transition function

use super::state::{ChatState, Phase, Turn, ERROR_PLACEHOLDER};
use super::{Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
///
/// A rejected event never mutates state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Please type in a prompt")]
    EmptyPrompt,
    #[error("A request is already in flight")]
    Busy,
    #[error("Completion for request {request_id} does not match the in-flight request")]
    StaleCompletion { request_id: u64 },
}

/// Pure transition function
///
/// Given the same state and event this always produces the same result,
/// with no I/O side effects.
pub fn transition(state: &ChatState, event: Event) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::InputChanged { text } => {
            let mut next = state.clone();
            next.input = text;
            Ok(TransitionResult::new(next))
        }

        // Submission: the user turn is appended synchronously, before any
        // network activity. Requests are serialized; a submit while one is
        // in flight is rejected rather than racing completions.
        Event::Submit { text } => {
            if text.trim().is_empty() {
                return Err(TransitionError::EmptyPrompt);
            }
            if state.is_loading() {
                return Err(TransitionError::Busy);
            }

            let request_id = state.next_request_id;
            let mut next = state.clone();
            next.turns.push(Turn::user(text.clone()));
            next.input.clear();
            next.phase = Phase::Generating { request_id };
            next.next_request_id += 1;

            Ok(TransitionResult::new(next)
                .with_effect(Effect::request_generation(request_id, text))
                .with_effect(Effect::ScrollToBottom))
        }

        Event::GenerationComplete { request_id, text } => {
            require_in_flight(state, request_id)?;

            let mut next = state.clone();
            next.turns.push(Turn::ai(text));
            next.phase = Phase::Idle;

            Ok(TransitionResult::new(next).with_effect(Effect::ScrollToBottom))
        }

        // A failed generation still leaves the user's turn in place; the
        // conversation gains the fixed placeholder instead of a response.
        Event::GenerationFailed { request_id, .. } => {
            require_in_flight(state, request_id)?;

            let mut next = state.clone();
            next.turns.push(Turn::ai(ERROR_PLACEHOLDER));
            next.phase = Phase::Idle;

            Ok(TransitionResult::new(next).with_effect(Effect::ScrollToBottom))
        }
    }
}

fn require_in_flight(state: &ChatState, request_id: u64) -> Result<(), TransitionError> {
    match state.phase {
        Phase::Generating { request_id: current } if current == request_id => Ok(()),
        _ => Err(TransitionError::StaleCompletion { request_id }),
    }
}
