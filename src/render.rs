//! Presentation projection
//!
//! Maps a session snapshot into renderable UI state. Pure: no protocol
//! logic, no network calls.

use crate::gate::Choice;
use crate::runtime::SessionSnapshot;
use crate::session::{SessionState, Speaker, Turn};
use serde::Serialize;
use std::fmt::Write as _;

/// Severity of the verdict banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Info,
    Warn,
    Error,
}

/// Verdict banner shown once a round has produced an outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub title: String,
    pub detail: String,
}

/// Everything the UI needs to draw the current session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub scenario_title: String,
    pub prompt: String,
    pub banner: Option<Banner>,
    pub choices: Vec<Choice>,
    pub transcript: Vec<Turn>,
    pub show_reset: bool,
}

/// Project a session snapshot into its render model
pub fn project(snapshot: &SessionSnapshot) -> RenderModel {
    let banner = match &snapshot.state {
        SessionState::Idle
        | SessionState::AwaitingInitial
        | SessionState::AwaitingBinding { .. } => None,
        SessionState::Clarifying { .. } => Some(Banner {
            kind: BannerKind::Warn,
            title: "Gate verdict: AMBIGUOUS_UNRESOLVED".to_string(),
            detail: "Clarification required.".to_string(),
        }),
        SessionState::Resolved { .. } => Some(Banner {
            kind: BannerKind::Info,
            title: "Gate verdict: ADMISSIBLE".to_string(),
            detail: "Resolution permitted after binding.".to_string(),
        }),
        SessionState::Unresolved { message, .. } => Some(Banner {
            kind: BannerKind::Error,
            title: "Gate verdict: INADMISSIBLE_UNSUPPORTED".to_string(),
            detail: message.clone(),
        }),
    };

    let choices = match &snapshot.state {
        SessionState::Clarifying { options, .. } => options.clone(),
        _ => vec![],
    };

    RenderModel {
        scenario_title: snapshot.title.clone(),
        prompt: snapshot.prompt.clone(),
        banner,
        choices,
        transcript: snapshot.transcript.clone(),
        show_reset: snapshot.state != SessionState::Idle,
    }
}

/// Plain-text rendering used by the terminal driver
pub fn render_text(model: &RenderModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", model.scenario_title);
    let _ = writeln!(out, "{}", model.prompt);

    if let Some(banner) = &model.banner {
        let tag = match banner.kind {
            BannerKind::Info => "ok",
            BannerKind::Warn => "warn",
            BannerKind::Error => "bad",
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "[{tag}] {}", banner.title);
        if !banner.detail.is_empty() {
            let _ = writeln!(out, "     {}", banner.detail);
        }
    }

    if !model.transcript.is_empty() {
        let _ = writeln!(out);
        for turn in &model.transcript {
            let speaker = match turn.speaker {
                Speaker::System => "System",
                Speaker::User => "User",
            };
            let _ = writeln!(out, "{speaker}: {}", turn.text);
        }
    }

    if !model.choices.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Choices:");
        for (i, choice) in model.choices.iter().enumerate() {
            let _ = writeln!(out, "  {}) {}", i + 1, choice.label);
        }
    }

    if model.show_reset {
        let _ = writeln!(out);
        let _ = writeln!(out, "(reset available)");
    }

    out
}
