//! chat-relay - single-page chat over a hosted generation service
//!
//! A stateless HTTP relay that forwards prompts to the hosted model and
//! hides its credential, plus the conversation state machine and relay
//! client that make up the browser-facing session logic.

pub mod api;
pub mod client;
pub mod conversation;
pub mod llm;
pub mod platform;
pub mod session;
