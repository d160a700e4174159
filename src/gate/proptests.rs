//! Property-based tests for verdict interpretation

use super::verdict::{interpret, Choice, Verdict};
use proptest::prelude::*;
use serde_json::Value;

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

fn arb_option_element() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z_]{1,12}".prop_map(Value::String),
        ("[a-z_]{1,12}", proptest::option::of("[a-zA-Z ]{1,20}")).prop_map(|(id, label)| {
            let mut obj = serde_json::Map::new();
            obj.insert("id".to_string(), Value::String(id));
            if let Some(label) = label {
                obj.insert("label".to_string(), Value::String(label));
            }
            Value::Object(obj)
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // interpret is total: any JSON value yields a verdict without panicking,
    // and re-interpreting yields an equal verdict.
    #[test]
    fn prop_interpret_total_and_deterministic(raw in arb_json()) {
        let first = interpret(raw.clone());
        let second = interpret(raw);
        prop_assert_eq!(first, second);
    }

    // Shapes without a recognized status preserve the raw payload.
    #[test]
    fn prop_unrecognized_preserves_payload(raw in arb_json()) {
        let status_is_known = raw
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|s| matches!(s, "STOP" | "RESOLVED" | "UNKNOWN"));
        prop_assume!(!status_is_known);

        match interpret(raw.clone()) {
            Verdict::Unsupported { raw: kept } => prop_assert_eq!(kept, raw),
            v => prop_assert!(false, "expected Unsupported, got {:?}", v),
        }
    }

    // Well-formed option elements survive normalization in order, with the
    // label defaulting to the id.
    #[test]
    fn prop_options_normalize_in_order(
        elements in proptest::collection::vec(arb_option_element(), 0..6)
    ) {
        let raw = serde_json::json!({
            "status": "STOP",
            "question": "q",
            "options": elements.clone(),
        });

        let options = match interpret(raw) {
            Verdict::Stop { options, .. } => options,
            v => {
                prop_assert!(false, "expected Stop, got {v:?}");
                unreachable!()
            }
        };

        prop_assert_eq!(options.len(), elements.len());
        for (choice, element) in options.iter().zip(&elements) {
            let expected = match element {
                Value::String(id) => Choice::bare(id.clone()),
                Value::Object(obj) => {
                    let id = obj["id"].as_str().unwrap();
                    let label = obj.get("label").and_then(Value::as_str).unwrap_or(id);
                    Choice::new(id, label)
                }
                _ => unreachable!(),
            };
            prop_assert_eq!(choice, &expected);
        }
    }
}
