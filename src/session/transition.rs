//! Pure state transition function

use super::{Effect, Event, SessionContext, SessionState};
use crate::gate::Verdict;
use serde_json::Value;
use thiserror::Error;

/// Transcript line written when a query is issued
pub const CALLING_GATE: &str = "Calling gate…";
/// Generic failure message for transport-level errors
pub const UNAVAILABLE_MESSAGE: &str = "Demo unavailable.";
/// Message for unsupported or protocol-violating responses
pub const UNEXPECTED_MESSAGE: &str = "Unexpected response.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
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
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("A gate exchange is already in flight for this session")]
    SessionBusy,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function: given the same inputs it always produces the
/// same outputs, with no I/O side effects. The runtime executes the returned
/// effects and feeds any resulting events back in.
pub fn transition(
    state: &SessionState,
    _context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User actions
        // ============================================================

        // Idle + Start -> AwaitingInitial, first round with no binding
        (SessionState::Idle, Event::Start) => {
            Ok(TransitionResult::new(SessionState::AwaitingInitial)
                .with_effect(Effect::record_system(CALLING_GATE))
                .with_effect(Effect::query_initial()))
        }

        // At most one exchange in flight per session
        (SessionState::AwaitingInitial | SessionState::AwaitingBinding { .. }, Event::Start)
        | (
            SessionState::AwaitingInitial | SessionState::AwaitingBinding { .. },
            Event::Choose { .. },
        ) => Err(TransitionError::SessionBusy),

        // Clarifying + Choose -> AwaitingBinding, second round bound to the
        // chosen id. Membership in the rendered option set is not enforced
        // here; well-formed callers only submit listed ids.
        (SessionState::Clarifying { .. }, Event::Choose { id }) => {
            Ok(TransitionResult::new(SessionState::AwaitingBinding {
                binding: id.clone(),
            })
            .with_effect(Effect::record_user(id.clone()))
            .with_effect(Effect::query_bound(id)))
        }

        // ============================================================
        // First-round verdicts
        // ============================================================

        (SessionState::AwaitingInitial, Event::GateVerdict { verdict }) => {
            Ok(first_round_outcome(verdict))
        }

        // ============================================================
        // Second-round verdicts: only Resolved or a failure is allowed
        // ============================================================

        (SessionState::AwaitingBinding { .. }, Event::GateVerdict { verdict }) => {
            Ok(second_round_outcome(verdict))
        }

        // ============================================================
        // Transport failure ends the round, never the session
        // ============================================================

        (
            SessionState::AwaitingInitial | SessionState::AwaitingBinding { .. },
            Event::GateFailed { message },
        ) => Ok(TransitionResult::new(SessionState::Unresolved {
            message: UNAVAILABLE_MESSAGE.to_string(),
            detail: None,
        })
        .with_effect(Effect::record_system(message))),

        // ============================================================
        // Reset and scenario change return to Idle from anywhere
        // ============================================================

        (_, Event::Reset | Event::ScenarioChanged) => {
            Ok(TransitionResult::new(SessionState::Idle).with_effect(Effect::ClearTranscript))
        }

        // ============================================================
        // Invalid transitions
        // ============================================================

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "No transition from {state:?} with event {event:?}"
        ))),
    }
}

fn first_round_outcome(verdict: Verdict) -> TransitionResult {
    match verdict {
        Verdict::Stop { question, options } => {
            let mut result = TransitionResult::new(SessionState::Clarifying {
                question: question.clone(),
                options,
            })
            .with_effect(Effect::record_system("STOP"));
            if !question.is_empty() {
                result = result.with_effect(Effect::record_system(question));
            }
            result
        }
        Verdict::Resolved { statement } => resolved_outcome(statement),
        Verdict::Unknown { message } => unknown_outcome(message),
        Verdict::Unsupported { raw } => unsupported_outcome(raw),
    }
}

fn second_round_outcome(verdict: Verdict) -> TransitionResult {
    match verdict {
        Verdict::Resolved { statement } => resolved_outcome(statement),
        // A repeated Stop violates the protocol: the second round never
        // loops back into clarification. Surface it with the full verdict
        // as diagnostics.
        Verdict::Stop { .. } => {
            let detail = serde_json::to_value(&verdict).unwrap_or(Value::Null);
            let dump = unsupported_dump(&detail);
            TransitionResult::new(SessionState::Unresolved {
                message: UNEXPECTED_MESSAGE.to_string(),
                detail: Some(detail),
            })
            .with_effect(Effect::record_system(dump))
        }
        Verdict::Unknown { message } => unknown_outcome(message),
        Verdict::Unsupported { raw } => unsupported_outcome(raw),
    }
}

fn resolved_outcome(statement: String) -> TransitionResult {
    TransitionResult::new(SessionState::Resolved {
        statement: statement.clone(),
    })
    .with_effect(Effect::record_system(statement))
}

fn unknown_outcome(message: String) -> TransitionResult {
    TransitionResult::new(SessionState::Unresolved {
        message: message.clone(),
        detail: None,
    })
    .with_effect(Effect::record_system(message))
}

fn unsupported_outcome(raw: Value) -> TransitionResult {
    let dump = unsupported_dump(&raw);
    TransitionResult::new(SessionState::Unresolved {
        message: UNEXPECTED_MESSAGE.to_string(),
        detail: Some(raw),
    })
    .with_effect(Effect::record_system(dump))
}

fn unsupported_dump(raw: &Value) -> String {
    let rendered = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    format!("Unexpected: {rendered}")
}
