//! Scenario registry
//!
//! A fixed, read-only table of the ambiguous contexts the demo can send to
//! the gate, populated once at startup.

use std::collections::HashMap;

/// Built-in default when no configured default applies
pub const DEFAULT_SCENARIO_ID: &str = "bird";

/// A named, predefined ambiguous context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    /// Unique key
    pub id: &'static str,
    /// Display title
    pub title: &'static str,
    /// Human-readable prompt shown before any query is issued
    pub prompt: &'static str,
    /// Statements sent to the gate, in narrative order
    pub context: &'static [&'static str],
}

impl Scenario {
    /// Context statements as owned strings, order preserved
    pub fn statements(&self) -> Vec<String> {
        self.context.iter().map(ToString::to_string).collect()
    }
}

/// All scenarios shipped with the client
pub fn all_scenarios() -> &'static [Scenario] {
    &[
        Scenario {
            id: "bird",
            title: "The missing bird",
            prompt: "Two owners, one report. Ask the gate whose bird went missing.",
            context: &[
                "James has a bird.",
                "Jenny has a bird.",
                "The bird is missing.",
            ],
        },
        Scenario {
            id: "telescope",
            title: "The telescope",
            prompt: "One sentence, two readings. Who had the telescope?",
            context: &["I saw the man with the telescope."],
        },
        Scenario {
            id: "trophy",
            title: "The trophy",
            prompt: "A pronoun with two candidates. What was too big?",
            context: &["The trophy does not fit in the brown suitcase because it is too big."],
        },
    ]
}

/// Registry of available scenarios
pub struct ScenarioRegistry {
    scenarios: HashMap<&'static str, &'static Scenario>,
    default_id: &'static str,
}

impl ScenarioRegistry {
    /// Build the table from the static definitions. A configured default id
    /// that is absent from the table falls back to the built-in default.
    pub fn new(default_id: Option<String>) -> Self {
        let scenarios: HashMap<&'static str, &'static Scenario> =
            all_scenarios().iter().map(|s| (s.id, s)).collect();

        let default_id = default_id
            .and_then(|id| scenarios.get(id.as_str()).map(|s| s.id))
            .unwrap_or(DEFAULT_SCENARIO_ID);

        Self {
            scenarios,
            default_id,
        }
    }

    /// Look up a scenario by id
    pub fn get(&self, id: &str) -> Option<&'static Scenario> {
        self.scenarios.get(id).copied()
    }

    /// The default scenario; the table always contains it
    pub fn default_scenario(&self) -> &'static Scenario {
        self.scenarios[self.default_id]
    }

    pub fn default_scenario_id(&self) -> &str {
        self.default_id
    }

    /// Look up a scenario, falling back to the default when the id is unknown
    pub fn get_or_default(&self, id: &str) -> &'static Scenario {
        self.get(id).unwrap_or_else(|| {
            tracing::warn!(scenario = id, "Unknown scenario, using default");
            self.default_scenario()
        })
    }

    /// All scenario ids, sorted
    pub fn available(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.scenarios.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}
