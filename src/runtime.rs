//! Session runtime
//!
//! Owns the single active session, sequences gate exchanges, and applies
//! transition effects. User actions dispatch through the pure transition
//! function; executing an effect can generate a follow-up event, which is
//! fed back in until the session settles.

#[cfg(test)]
pub mod testing;

use crate::gate::GateService;
use crate::scenario::{Scenario, ScenarioRegistry};
use crate::session::{
    transition, Effect, Event, SessionContext, SessionState, TransitionError, Turn,
};

/// Point-in-time view of the session handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub scenario_id: String,
    pub title: String,
    pub prompt: String,
    pub state: SessionState,
    pub transcript: Vec<Turn>,
}

/// Generic session runtime that works with any gate implementation
pub struct SessionRuntime<G: GateService> {
    gate: G,
    registry: ScenarioRegistry,
    scenario: &'static Scenario,
    context: SessionContext,
    state: SessionState,
    transcript: Vec<Turn>,
}

impl<G: GateService> SessionRuntime<G> {
    /// Create a runtime starting idle on the registry's default scenario
    pub fn new(gate: G, registry: ScenarioRegistry) -> Self {
        let scenario = registry.default_scenario();
        Self {
            gate,
            context: SessionContext::new(scenario),
            scenario,
            registry,
            state: SessionState::Idle,
            transcript: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn scenario(&self) -> &'static Scenario {
        self.scenario
    }

    #[allow(dead_code)] // API completeness
    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// Snapshot for the presentation adapter; the adapter never sees the
    /// live session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scenario_id: self.context.scenario_id.clone(),
            title: self.scenario.title.to_string(),
            prompt: self.scenario.prompt.to_string(),
            state: self.state.clone(),
            transcript: self.transcript.clone(),
        }
    }

    /// Switch the active scenario, discarding the current round. Unknown ids
    /// fall back to the default scenario.
    pub async fn select_scenario(&mut self, id: &str) -> Result<(), TransitionError> {
        let scenario = self.registry.get_or_default(id);
        self.scenario = scenario;
        self.context = SessionContext::new(scenario);
        self.dispatch(Event::ScenarioChanged).await
    }

    /// Dispatch an action and drive any resulting gate exchange to
    /// completion. The exchange is awaited before the next event is
    /// processed, so at most one request is ever in flight.
    pub async fn dispatch(&mut self, event: Event) -> Result<(), TransitionError> {
        let mut events = vec![event];

        while let Some(current) = events.pop() {
            let result = transition(&self.state, &self.context, current)?;
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(generated) = self.execute_effect(effect).await {
                    events.push(generated);
                }
            }
        }

        Ok(())
    }

    async fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RecordTurn { turn } => {
                self.transcript.push(turn);
                None
            }
            Effect::ClearTranscript => {
                self.transcript.clear();
                None
            }
            Effect::QueryGate { binding } => {
                let outcome = self
                    .gate
                    .query(&self.context.statements, binding.as_deref())
                    .await;
                match outcome {
                    Ok(verdict) => Some(Event::GateVerdict { verdict }),
                    Err(e) => {
                        tracing::warn!(error = %e, "Gate exchange failed");
                        Some(Event::GateFailed {
                            message: e.to_string(),
                        })
                    }
                }
            }
        }
    }
}
