//! Conversation state types

use serde::{Deserialize, Serialize};

/// Fixed message shown in place of a response when generation fails
pub const ERROR_PLACEHOLDER: &str = "Error generating content.";

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One exchange unit in a conversation
///
/// Immutable once appended; identity is its position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub sender: Sender,
    pub message: String,
}

impl Turn {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            message: message.into(),
        }
    }

    pub fn ai(message: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            message: message.into(),
        }
    }
}

/// Request phase
///
/// `Generating` carries the id of the in-flight request so a completion for
/// a superseded request can never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Generating { request_id: u64 },
}

/// In-memory conversation state for one session
///
/// Turns are append-only in display order; the sequence lives only as long
/// as the session and is never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    pub turns: Vec<Turn>,
    /// Input buffer, cleared on submission
    pub input: String,
    pub phase: Phase,
    /// Monotonic source of request ids
    pub next_request_id: u64,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True from submission until the matching completion or failure
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Generating { .. })
    }
}
