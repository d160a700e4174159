//! Clarification gate demo client
//!
//! A terminal driver around the session runtime: reads user actions,
//! dispatches them into the state machine, and prints the projected view.
//! All decision logic lives in the core modules.

mod gate;
mod render;
mod runtime;
mod scenario;
mod session;

use gate::{HttpGateClient, LoggingGate};
use render::{project, render_text};
use runtime::SessionRuntime;
use scenario::ScenarioRegistry;
use session::{Event, SessionState};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for the UI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clarigate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let endpoint = std::env::var("GATE_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let registry = ScenarioRegistry::new(std::env::var("GATE_DEFAULT_SCENARIO").ok());

    tracing::info!(
        endpoint = %endpoint,
        scenarios = ?registry.available(),
        default = %registry.default_scenario_id(),
        "Gate client configured"
    );

    let gate = LoggingGate::new(Arc::new(HttpGateClient::new(endpoint)));
    let mut runtime = SessionRuntime::new(gate, registry);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("{}", render_text(&project(&runtime.snapshot())));
        print_commands(runtime.state());

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        let outcome = if input.is_empty() {
            continue;
        } else if matches!(input, "q" | "quit") {
            break;
        } else if matches!(input, "s" | "start") {
            runtime.dispatch(Event::Start).await
        } else if matches!(input, "r" | "reset") {
            runtime.dispatch(Event::Reset).await
        } else if let Some(id) = input.strip_prefix("scenario ") {
            runtime.select_scenario(id.trim()).await
        } else if let Some(id) = choice_for_input(runtime.state(), input) {
            runtime.dispatch(Event::Choose { id }).await
        } else {
            println!("Unrecognized input: {input}");
            continue;
        };

        // Rejected dispatches end the attempt, not the program
        if let Err(e) = outcome {
            println!("{e}");
        }
    }

    Ok(())
}

/// Map a typed option number or bare id to one of the rendered choices
fn choice_for_input(state: &SessionState, input: &str) -> Option<String> {
    let SessionState::Clarifying { options, .. } = state else {
        return None;
    };

    if let Ok(n) = input.parse::<usize>() {
        if (1..=options.len()).contains(&n) {
            return Some(options[n - 1].id.clone());
        }
    }

    options.iter().find(|c| c.id == input).map(|c| c.id.clone())
}

fn print_commands(state: &SessionState) {
    match state {
        SessionState::Idle => println!("Commands: start | scenario <id> | quit"),
        SessionState::Clarifying { .. } => {
            println!("Commands: <choice number or id> | reset | scenario <id> | quit");
        }
        _ => println!("Commands: reset | scenario <id> | quit"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Choice;

    fn clarifying() -> SessionState {
        SessionState::Clarifying {
            question: "Whose bird is missing?".to_string(),
            options: vec![Choice::bare("james_bird"), Choice::bare("jenny_bird")],
        }
    }

    #[test]
    fn numbers_map_to_choice_ids() {
        let state = clarifying();
        assert_eq!(
            choice_for_input(&state, "1"),
            Some("james_bird".to_string())
        );
        assert_eq!(
            choice_for_input(&state, "2"),
            Some("jenny_bird".to_string())
        );
        assert_eq!(choice_for_input(&state, "3"), None);
        assert_eq!(choice_for_input(&state, "0"), None);
    }

    #[test]
    fn bare_ids_map_to_themselves() {
        let state = clarifying();
        assert_eq!(
            choice_for_input(&state, "jenny_bird"),
            Some("jenny_bird".to_string())
        );
        assert_eq!(choice_for_input(&state, "unlisted"), None);
    }

    #[test]
    fn no_choices_outside_clarifying() {
        assert_eq!(choice_for_input(&SessionState::Idle, "1"), None);
    }
}
