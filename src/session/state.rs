//! Session state types

use crate::gate::Choice;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// No query issued yet for the active scenario
    #[default]
    Idle,

    /// Initial query in flight
    AwaitingInitial,

    /// Stop verdict rendered, waiting for the user to pick a choice
    Clarifying {
        question: String,
        options: Vec<Choice>,
    },

    /// Bound-choice query in flight
    AwaitingBinding { binding: String },

    /// Terminal success
    Resolved { statement: String },

    /// Terminal failure; re-enterable via reset
    Unresolved {
        message: String,
        /// Raw payload kept for diagnostics when the round ended on an
        /// unsupported or protocol-violating response
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<Value>,
    },
}

impl SessionState {
    /// Terminal states; only reset or a scenario change leaves them
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Resolved { .. } | SessionState::Unresolved { .. }
        )
    }

    /// A gate exchange is outstanding
    #[allow(dead_code)] // State query utility
    pub fn in_flight(&self) -> bool {
        matches!(
            self,
            SessionState::AwaitingInitial | SessionState::AwaitingBinding { .. }
        )
    }
}

/// Immutable configuration for a session: the active scenario's identity and
/// the statements sent with every exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub scenario_id: String,
    pub statements: Vec<String>,
}

impl SessionContext {
    pub fn new(scenario: &Scenario) -> Self {
        Self {
            scenario_id: scenario.id.to_string(),
            statements: scenario.statements(),
        }
    }
}

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    System,
    User,
}

/// One entry in the running transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}
