//! Effects produced by state transitions

use super::state::Turn;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Perform a gate exchange for the active scenario's context
    QueryGate { binding: Option<String> },

    /// Append a turn to the running transcript
    RecordTurn { turn: Turn },

    /// Drop the transcript (reset, scenario change)
    ClearTranscript,
}

impl Effect {
    pub fn query_initial() -> Self {
        Effect::QueryGate { binding: None }
    }

    pub fn query_bound(binding: impl Into<String>) -> Self {
        Effect::QueryGate {
            binding: Some(binding.into()),
        }
    }

    pub fn record_system(text: impl Into<String>) -> Self {
        Effect::RecordTurn {
            turn: Turn::system(text),
        }
    }

    pub fn record_user(text: impl Into<String>) -> Self {
        Effect::RecordTurn {
            turn: Turn::user(text),
        }
    }
}
