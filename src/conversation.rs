//! Core conversation state machine
//!
//! Pure state transitions over the in-memory conversation: the only stateful
//! logic in the system. I/O (the upstream call, scrolling, warnings) is
//! expressed as effects and executed by the session driver.

mod effect;
mod event;
mod state;
mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatState, Phase, Sender, Turn, ERROR_PLACEHOLDER};
pub use transition::{transition, TransitionError, TransitionResult};
