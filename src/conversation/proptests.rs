//! Property-based tests for the conversation state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::llm::GenerationError;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Driver-level operations against the state machine
#[derive(Debug, Clone)]
enum Op {
    /// Submit arbitrary text (may be blank or whitespace-only)
    Submit(String),
    /// Complete the in-flight request, if any, with this text
    CompleteInFlight(String),
    /// Fail the in-flight request, if any
    FailInFlight,
    /// Deliver a completion tagged with an arbitrary (likely stale) id
    CompleteTagged(u64, String),
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{1,30}",
        Just(String::new()),
        Just("   ".to_string()),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_text().prop_map(Op::Submit),
        "[a-zA-Z ]{0,30}".prop_map(Op::CompleteInFlight),
        Just(Op::FailInFlight),
        (0u64..10, "[a-z]{1,10}").prop_map(|(id, text)| Op::CompleteTagged(id, text)),
    ]
}

fn in_flight_id(state: &ChatState) -> Option<u64> {
    match state.phase {
        Phase::Generating { request_id } => Some(request_id),
        Phase::Idle => None,
    }
}

fn apply(state: &ChatState, op: &Op) -> Result<TransitionResult, TransitionError> {
    let event = match op {
        Op::Submit(text) => Event::Submit { text: text.clone() },
        Op::CompleteInFlight(text) => Event::GenerationComplete {
            request_id: in_flight_id(state).unwrap_or(u64::MAX),
            text: text.clone(),
        },
        Op::FailInFlight => Event::GenerationFailed {
            request_id: in_flight_id(state).unwrap_or(u64::MAX),
            error: GenerationError::network("simulated failure"),
        },
        Op::CompleteTagged(id, text) => Event::GenerationComplete {
            request_id: *id,
            text: text.clone(),
        },
    };
    transition(state, event)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Turns are append-only: every accepted transition preserves the
    /// existing sequence as a prefix and appends at most one turn.
    #[test]
    fn prop_turns_append_only(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let mut state = ChatState::new();

        for op in &ops {
            let before = state.turns.clone();
            if let Ok(result) = apply(&state, op) {
                prop_assert!(result.new_state.turns.len() >= before.len());
                prop_assert!(result.new_state.turns.len() <= before.len() + 1);
                prop_assert_eq!(&result.new_state.turns[..before.len()], &before[..]);
                state = result.new_state;
            }
        }
    }

    /// Loading is true exactly while a request is in flight: an accepted
    /// submit sets it, an accepted completion or failure always clears it.
    #[test]
    fn prop_loading_never_stuck(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let mut state = ChatState::new();

        for op in &ops {
            if let Ok(result) = apply(&state, op) {
                match op {
                    Op::Submit(_) => prop_assert!(result.new_state.is_loading()),
                    Op::CompleteInFlight(_) | Op::FailInFlight | Op::CompleteTagged(..) => {
                        prop_assert!(!result.new_state.is_loading());
                    }
                }
                state = result.new_state;
            }
        }
    }

    /// Every user turn is followed (eventually) by exactly one ai turn:
    /// senders strictly alternate starting from the user.
    #[test]
    fn prop_senders_alternate(ops in proptest::collection::vec(arb_op(), 0..40)) {
        let mut state = ChatState::new();

        for op in &ops {
            if let Ok(result) = apply(&state, op) {
                state = result.new_state;
            }
        }

        for (i, turn) in state.turns.iter().enumerate() {
            let expected = if i % 2 == 0 { Sender::User } else { Sender::Ai };
            prop_assert_eq!(turn.sender, expected);
        }
    }

    /// A completion tagged with anything but the in-flight id is rejected
    /// and never mutates state.
    #[test]
    fn prop_stale_completions_inert(
        ops in proptest::collection::vec(arb_op(), 0..40),
        stale_id in 100u64..200,
        text in "[a-z]{1,10}",
    ) {
        let mut state = ChatState::new();
        for op in &ops {
            if let Ok(result) = apply(&state, op) {
                state = result.new_state;
            }
        }

        // Ids are drawn from a range the op sequence can never reach.
        let result = transition(
            &state,
            Event::GenerationComplete { request_id: stale_id, text },
        );
        let is_stale = matches!(result, Err(TransitionError::StaleCompletion { .. }));
        prop_assert!(is_stale);
    }

    /// Blank submissions are rejected regardless of surrounding activity.
    #[test]
    fn prop_blank_submit_always_rejected(
        ops in proptest::collection::vec(arb_op(), 0..20),
        blank in "[ \t\n]{0,6}",
    ) {
        let mut state = ChatState::new();
        for op in &ops {
            if let Ok(result) = apply(&state, op) {
                state = result.new_state;
            }
        }

        let before = state.clone();
        let result = transition(&state, Event::Submit { text: blank });
        prop_assert!(matches!(result, Err(TransitionError::EmptyPrompt)));
        prop_assert_eq!(state, before);
    }
}
