//! Per-session interaction state.
//!
//! A [`SessionState`] starts empty and is only moved forward by the
//! [`InteractionController`](crate::controller::InteractionController).
//! Dropping it ends the session; nothing is persisted.

mod store;

pub use store::{SessionHandle, SessionStore};

use serde::{Deserialize, Serialize};

/// A question and its answer, in the order asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub question: String,
    /// `None` when the answer could not be generated.
    pub answer: Option<String>,
}

/// Everything a user has produced in one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Raw URL as last submitted.
    pub url: Option<String>,
    /// Thumbnail for the submitted URL, when a video id could be found.
    pub thumbnail_url: Option<String>,
    pub transcript: Option<String>,
    pub summary: Option<String>,
    pub fact_check: Option<String>,
    pub fact_check_enabled: bool,
    pub queries: Vec<QueryRecord>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the session currently stands.
    pub fn stage(&self) -> Stage {
        if self.fact_check.is_some() {
            Stage::FactCheckReady
        } else if self.summary.is_some() {
            Stage::SummaryReady
        } else if self.url.is_some() {
            Stage::UrlEntered
        } else {
            Stage::Idle
        }
    }

    /// Questions can be asked once a transcript exists.
    pub fn can_ask(&self) -> bool {
        self.transcript.is_some()
    }

    /// Whether the state satisfies its cross-field rules.
    pub fn is_consistent(&self) -> bool {
        let fact_check_ok =
            self.fact_check.is_none() || (self.summary.is_some() && self.fact_check_enabled);
        let enabled_ok = !self.fact_check_enabled || self.summary.is_some();
        fact_check_ok && enabled_ok
    }
}

/// Coarse progress of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    UrlEntered,
    SummaryReady,
    FactCheckReady,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Idle => write!(f, "idle"),
            Stage::UrlEntered => write!(f, "url_entered"),
            Stage::SummaryReady => write!(f, "summary_ready"),
            Stage::FactCheckReady => write!(f, "fact_check_ready"),
        }
    }
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum Command {
    SubmitUrl(String),
    RequestNotes,
    RequestFactCheck,
    Ask(String),
}

/// User-visible message produced while handling a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = SessionState::new();
        assert_eq!(state.stage(), Stage::Idle);
        assert!(!state.can_ask());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_stage_progression() {
        let mut state = SessionState {
            url: Some("https://youtu.be/abc123".to_string()),
            ..Default::default()
        };
        assert_eq!(state.stage(), Stage::UrlEntered);

        state.transcript = Some("hello".to_string());
        state.summary = Some("notes".to_string());
        state.fact_check_enabled = true;
        assert_eq!(state.stage(), Stage::SummaryReady);

        state.fact_check = Some("looks right".to_string());
        assert_eq!(state.stage(), Stage::FactCheckReady);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_inconsistent_fact_check() {
        let state = SessionState {
            fact_check: Some("orphan".to_string()),
            ..Default::default()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_notice_serialization() {
        let json = serde_json::to_value(Notice::Warning("Please type your query first.".to_string()))
            .unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["message"], "Please type your query first.");
    }
}
