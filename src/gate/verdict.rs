//! Verdict types and response interpretation
//!
//! Every structurally valid JSON response maps to exactly one [`Verdict`]
//! variant. Shapes the protocol does not recognize fold into
//! [`Verdict::Unsupported`] carrying the raw payload for diagnostics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when the gate reports UNKNOWN without a message of its own.
pub const DEFAULT_UNKNOWN_MESSAGE: &str = "Insufficient information.";

/// A single disambiguation choice offered by the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
}

impl Choice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// A bare identifier; the label defaults to the id.
    pub fn bare(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
        }
    }
}

/// Normalized interpretation of a gate response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Verdict {
    /// Clarification required before the context can resolve
    Stop {
        question: String,
        options: Vec<Choice>,
    },
    /// Final disambiguated statement
    Resolved { statement: String },
    /// The gate cannot resolve with the available information
    Unknown { message: String },
    /// Any response shape the protocol does not define
    Unsupported { raw: Value },
}

impl Verdict {
    /// Short tag for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Verdict::Stop { .. } => "stop",
            Verdict::Resolved { .. } => "resolved",
            Verdict::Unknown { .. } => "unknown",
            Verdict::Unsupported { .. } => "unsupported",
        }
    }
}

/// Map a raw response body into a verdict. First match on `status` wins;
/// total over all JSON values.
pub fn interpret(raw: Value) -> Verdict {
    match raw.get("status").and_then(Value::as_str) {
        Some("STOP") => {
            let question = raw
                .get("question")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let options = raw
                .get("options")
                .and_then(Value::as_array)
                .map(|opts| opts.iter().filter_map(normalize_choice).collect())
                .unwrap_or_default();
            Verdict::Stop { question, options }
        }
        Some("RESOLVED") => {
            let statement = raw
                .get("statement")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Verdict::Resolved { statement }
        }
        Some("UNKNOWN") => {
            let message = raw
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_UNKNOWN_MESSAGE)
                .to_string();
            Verdict::Unknown { message }
        }
        _ => Verdict::Unsupported { raw },
    }
}

/// An option element is either a bare id string or an `{id, label}` object
/// with the label defaulting to the id. Anything else is dropped.
fn normalize_choice(value: &Value) -> Option<Choice> {
    match value {
        Value::String(id) => Some(Choice::bare(id.clone())),
        Value::Object(obj) => {
            let id = obj.get("id").and_then(Value::as_str)?;
            let label = obj.get("label").and_then(Value::as_str).unwrap_or(id);
            Some(Choice::new(id, label))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stop_with_bare_string_options() {
        let verdict = interpret(json!({
            "status": "STOP",
            "question": "Whose bird is missing?",
            "options": ["james_bird", "jenny_bird"],
        }));
        assert_eq!(
            verdict,
            Verdict::Stop {
                question: "Whose bird is missing?".to_string(),
                options: vec![Choice::bare("james_bird"), Choice::bare("jenny_bird")],
            }
        );
    }

    #[test]
    fn stop_with_labeled_options_and_label_defaulting() {
        let verdict = interpret(json!({
            "status": "STOP",
            "question": "Which one?",
            "options": [
                {"id": "a", "label": "The first one"},
                {"id": "b"},
            ],
        }));
        let Verdict::Stop { options, .. } = verdict else {
            panic!("expected Stop");
        };
        assert_eq!(options[0], Choice::new("a", "The first one"));
        assert_eq!(options[1], Choice::bare("b"));
    }

    #[test]
    fn stop_without_options_yields_empty_sequence() {
        let verdict = interpret(json!({"status": "STOP", "question": ""}));
        assert_eq!(
            verdict,
            Verdict::Stop {
                question: String::new(),
                options: vec![],
            }
        );
    }

    #[test]
    fn stop_drops_malformed_option_elements() {
        let verdict = interpret(json!({
            "status": "STOP",
            "question": "q",
            "options": ["ok", 42, {"label": "no id"}, null],
        }));
        let Verdict::Stop { options, .. } = verdict else {
            panic!("expected Stop");
        };
        assert_eq!(options, vec![Choice::bare("ok")]);
    }

    #[test]
    fn resolved_carries_statement() {
        let verdict = interpret(json!({
            "status": "RESOLVED",
            "statement": "James's bird is missing.",
        }));
        assert_eq!(
            verdict,
            Verdict::Resolved {
                statement: "James's bird is missing.".to_string(),
            }
        );
    }

    #[test]
    fn unknown_defaults_message() {
        assert_eq!(
            interpret(json!({"status": "UNKNOWN"})),
            Verdict::Unknown {
                message: DEFAULT_UNKNOWN_MESSAGE.to_string(),
            }
        );
        assert_eq!(
            interpret(json!({"status": "UNKNOWN", "message": "No idea."})),
            Verdict::Unknown {
                message: "No idea.".to_string(),
            }
        );
    }

    #[test]
    fn unrecognized_shapes_fall_into_unsupported() {
        let raw = json!({"foo": "bar"});
        assert_eq!(
            interpret(raw.clone()),
            Verdict::Unsupported { raw: raw.clone() }
        );
        // Non-string status is not a recognized status
        assert_eq!(
            interpret(json!({"status": 7})),
            Verdict::Unsupported {
                raw: json!({"status": 7})
            }
        );
        // Non-object payloads are preserved too
        assert_eq!(
            interpret(json!([1, 2, 3])),
            Verdict::Unsupported {
                raw: json!([1, 2, 3])
            }
        );
    }

    #[test]
    fn interpret_is_deterministic() {
        let raw = json!({"status": "STOP", "question": "q", "options": ["a"]});
        assert_eq!(interpret(raw.clone()), interpret(raw));
    }
}
