//! Events that drive session transitions

use crate::gate::Verdict;

/// User actions and gate results that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User actions
    /// Issue the initial query for the active scenario
    Start,
    /// Submit a disambiguating choice by id
    Choose { id: String },
    /// Clear the session and return to the scenario's default presentation
    Reset,
    /// A different scenario became active; discards the current round
    ScenarioChanged,

    // Gate client results
    GateVerdict { verdict: Verdict },
    GateFailed { message: String },
}
