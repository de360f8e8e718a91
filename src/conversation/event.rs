//! Events that can occur in a conversation

use crate::llm::GenerationError;

/// Events that trigger state transitions
#[derive(Debug)]
pub enum Event {
    // User events
    InputChanged {
        text: String,
    },
    Submit {
        text: String,
    },

    // Generation events
    GenerationComplete {
        request_id: u64,
        text: String,
    },
    GenerationFailed {
        request_id: u64,
        /// Carried for the driver's logs; the visible turn is always the
        /// fixed placeholder.
        error: GenerationError,
    },
}
