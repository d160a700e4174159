//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::gate::{Choice, Verdict};
use proptest::prelude::*;
use serde_json::Value;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> SessionContext {
    SessionContext {
        scenario_id: "bird".to_string(),
        statements: vec![
            "James has a bird.".to_string(),
            "Jenny has a bird.".to_string(),
            "The bird is missing.".to_string(),
        ],
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_choice() -> impl Strategy<Value = Choice> {
    ("[a-z_]{1,12}", proptest::option::of("[a-zA-Z ]{1,20}")).prop_map(|(id, label)| match label {
        Some(label) => Choice::new(id, label),
        None => Choice::bare(id),
    })
}

fn arb_options() -> impl Strategy<Value = Vec<Choice>> {
    proptest::collection::vec(arb_choice(), 0..4)
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9_ ]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::hash_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_verdict() -> impl Strategy<Value = Verdict> {
    prop_oneof![
        ("[a-zA-Z ?]{0,30}", arb_options())
            .prop_map(|(question, options)| Verdict::Stop { question, options }),
        "[a-zA-Z '.]{1,40}".prop_map(|statement| Verdict::Resolved { statement }),
        "[a-zA-Z '.]{1,40}".prop_map(|message| Verdict::Unknown { message }),
        arb_json().prop_map(|raw| Verdict::Unsupported { raw }),
    ]
}

fn arb_clarifying_state() -> impl Strategy<Value = SessionState> {
    ("[a-zA-Z ?]{0,30}", arb_options())
        .prop_map(|(question, options)| SessionState::Clarifying { question, options })
}

fn arb_terminal_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        "[a-zA-Z '.]{1,40}".prop_map(|statement| SessionState::Resolved { statement }),
        ("[a-zA-Z '.]{1,40}", proptest::option::of(arb_json())).prop_map(|(message, detail)| {
            SessionState::Unresolved { message, detail }
        }),
    ]
}

fn arb_in_flight_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::AwaitingInitial),
        "[a-z_]{1,12}".prop_map(|binding| SessionState::AwaitingBinding { binding }),
    ]
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Idle),
        arb_in_flight_state(),
        arb_clarifying_state(),
        arb_terminal_state(),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Start),
        "[a-z_]{1,12}".prop_map(|id| Event::Choose { id }),
        Just(Event::Reset),
        Just(Event::ScenarioChanged),
        arb_verdict().prop_map(|verdict| Event::GateVerdict { verdict }),
        "[a-zA-Z :0-9]{1,30}".prop_map(|message| Event::GateFailed { message }),
    ]
}

// ============================================================================
// Effect Validity
// ============================================================================

fn effects_are_valid(effects: &[Effect], new_state: &SessionState) -> bool {
    // A gate exchange is issued exactly when the session enters an awaiting
    // state, and at most one per transition.
    let queries = effects
        .iter()
        .filter(|e| matches!(e, Effect::QueryGate { .. }))
        .count();
    if new_state.in_flight() {
        queries == 1
    } else {
        queries == 0
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: from a bound second round, only Resolved or Unresolved is
    // reachable, never another Clarifying, regardless of the response.
    #[test]
    fn prop_second_round_never_clarifies(
        binding in "[a-z_]{1,12}",
        verdict in arb_verdict()
    ) {
        let state = SessionState::AwaitingBinding { binding };
        let result = transition(&state, &test_context(), Event::GateVerdict { verdict }).unwrap();
        prop_assert!(
            result.new_state.is_terminal(),
            "second round must be terminal, got {:?}",
            result.new_state
        );
    }

    // Invariant 2: the chosen id is exactly the binding of the next request.
    #[test]
    fn prop_chosen_id_becomes_binding(
        state in arb_clarifying_state(),
        pick in 0usize..4
    ) {
        let options = match &state {
            SessionState::Clarifying { options, .. } => options.clone(),
            _ => unreachable!(),
        };
        prop_assume!(!options.is_empty());
        let id = options[pick % options.len()].id.clone();

        let result = transition(&state, &test_context(), Event::Choose { id: id.clone() }).unwrap();

        prop_assert!(
            matches!(
                &result.new_state,
                SessionState::AwaitingBinding { binding } if binding == &id
            ),
            "expected AwaitingBinding bound to chosen id"
        );
        prop_assert!(
            result.effects.contains(&Effect::QueryGate {
                binding: Some(id),
            }),
            "expected QueryGate effect for chosen id"
        );
    }

    // Invariant 3: reset is idempotent from every state.
    #[test]
    fn prop_reset_idempotent(state in arb_state()) {
        let first = transition(&state, &test_context(), Event::Reset).unwrap();
        prop_assert_eq!(&first.new_state, &SessionState::Idle);
        prop_assert!(first.effects.contains(&Effect::ClearTranscript));

        let second = transition(&first.new_state, &test_context(), Event::Reset).unwrap();
        prop_assert_eq!(&second.new_state, &SessionState::Idle);
        prop_assert_eq!(first.effects, second.effects);
    }

    // Invariant 4: in-flight states reject new user actions.
    #[test]
    fn prop_in_flight_rejects_actions(
        state in arb_in_flight_state(),
        id in "[a-z_]{1,12}"
    ) {
        let start = transition(&state, &test_context(), Event::Start);
        prop_assert!(matches!(start, Err(TransitionError::SessionBusy)));

        let choose = transition(&state, &test_context(), Event::Choose { id });
        prop_assert!(matches!(choose, Err(TransitionError::SessionBusy)));
    }

    // Invariant 5: a gate exchange is issued exactly when entering an
    // awaiting state.
    #[test]
    fn prop_query_effect_matches_awaiting(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            prop_assert!(
                effects_are_valid(&result.effects, &result.new_state),
                "invalid effects for {:?}: {:?}",
                result.new_state,
                result.effects
            );
        }
    }

    // Invariant 6: transport failure during either round recovers into
    // Unresolved with the generic message; nothing escapes.
    #[test]
    fn prop_gate_failure_recovers(
        state in arb_in_flight_state(),
        message in "[a-zA-Z :0-9]{1,30}"
    ) {
        let result = transition(&state, &test_context(), Event::GateFailed { message }).unwrap();
        prop_assert!(
            matches!(
                &result.new_state,
                SessionState::Unresolved { message, detail: None } if message == UNAVAILABLE_MESSAGE
            ),
            "expected Unresolved with generic unavailable message"
        );
    }

    // Invariant 7: terminal states only leave via reset or scenario change,
    // and both land in Idle.
    #[test]
    fn prop_terminal_leaves_only_to_idle(
        state in arb_terminal_state(),
        event in arb_event()
    ) {
        match transition(&state, &test_context(), event) {
            Ok(result) => prop_assert_eq!(result.new_state, SessionState::Idle),
            Err(_) => { /* rejected action, state unchanged */ }
        }
    }

    // Invariant 8: any event sequence from Idle keeps effects consistent.
    #[test]
    fn prop_sequences_preserve_validity(events in proptest::collection::vec(arb_event(), 0..20)) {
        let mut state = SessionState::Idle;
        let ctx = test_context();

        for event in events {
            match transition(&state, &ctx, event) {
                Ok(result) => {
                    prop_assert!(
                        effects_are_valid(&result.effects, &result.new_state),
                        "invalid effects for {:?}: {:?}",
                        result.new_state,
                        result.effects
                    );
                    state = result.new_state;
                }
                Err(_) => { /* rejected dispatch is fine */ }
            }
        }
    }
}

// ============================================================================
// Sequence Tests - Multi-Step Scenarios
// ============================================================================

/// Full happy path: start -> STOP -> choose -> RESOLVED
#[test]
fn test_full_clarification_cycle() {
    let ctx = test_context();
    let mut state = SessionState::Idle;

    let result = transition(&state, &ctx, Event::Start).unwrap();
    state = result.new_state;
    assert!(matches!(state, SessionState::AwaitingInitial));

    let result = transition(
        &state,
        &ctx,
        Event::GateVerdict {
            verdict: Verdict::Stop {
                question: "Whose bird is missing?".to_string(),
                options: vec![Choice::bare("james_bird"), Choice::bare("jenny_bird")],
            },
        },
    )
    .unwrap();
    state = result.new_state;
    assert!(matches!(state, SessionState::Clarifying { .. }));

    let result = transition(
        &state,
        &ctx,
        Event::Choose {
            id: "james_bird".to_string(),
        },
    )
    .unwrap();
    state = result.new_state;
    assert!(matches!(
        &state,
        SessionState::AwaitingBinding { binding } if binding == "james_bird"
    ));

    let result = transition(
        &state,
        &ctx,
        Event::GateVerdict {
            verdict: Verdict::Resolved {
                statement: "James's bird is missing.".to_string(),
            },
        },
    )
    .unwrap();
    assert!(matches!(
        &result.new_state,
        SessionState::Resolved { statement } if statement == "James's bird is missing."
    ));
}

/// UNKNOWN on the first round ends the session without options
#[test]
fn test_unknown_first_round_is_terminal() {
    let ctx = test_context();
    let result = transition(&SessionState::Idle, &ctx, Event::Start).unwrap();

    let result = transition(
        &result.new_state,
        &ctx,
        Event::GateVerdict {
            verdict: Verdict::Unknown {
                message: "Insufficient information.".to_string(),
            },
        },
    )
    .unwrap();

    assert!(matches!(
        &result.new_state,
        SessionState::Unresolved { message, detail: None }
            if message == "Insufficient information."
    ));
}

/// Scenario change mid-round discards the session
#[test]
fn test_scenario_change_discards_round() {
    let ctx = test_context();
    let state = SessionState::Clarifying {
        question: "q".to_string(),
        options: vec![Choice::bare("a")],
    };

    let result = transition(&state, &ctx, Event::ScenarioChanged).unwrap();
    assert_eq!(result.new_state, SessionState::Idle);
    assert!(result.effects.contains(&Effect::ClearTranscript));
}
