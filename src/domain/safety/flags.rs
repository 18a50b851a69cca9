//! Session safety flags and the distress pause-choice table.
//!
//! Each flag lives under its own ephemeral key (`session:<id>:<flag>`) so
//! concurrent updates are last-writer-wins per flag, and the awaiting flag
//! can serve as the distress flow's mutual-exclusion token.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::SessionId;

/// The ephemeral flags tracked per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionFlag {
    PauseAggregation,
    PauseTraining,
    DistressCheckPerformed,
    AwaitingDistressCheckResponse,
    SomaticAwaitingResponse,
}

impl SessionFlag {
    /// The flag name used in keys and API payloads.
    pub fn name(&self) -> &'static str {
        match self {
            SessionFlag::PauseAggregation => "pauseAggregation",
            SessionFlag::PauseTraining => "pauseTraining",
            SessionFlag::DistressCheckPerformed => "distressCheckPerformed",
            SessionFlag::AwaitingDistressCheckResponse => "awaitingDistressCheckResponse",
            SessionFlag::SomaticAwaitingResponse => "somaticAwaitingResponse",
        }
    }

    /// The fully namespaced ephemeral-store key for a session.
    pub fn key(&self, session_id: &SessionId) -> String {
        session_key(session_id, self.name())
    }
}

impl fmt::Display for SessionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds a namespaced ephemeral key: `session:<sessionId>:<field>`.
pub fn session_key(session_id: &SessionId, field: &str) -> String {
    format!("session:{}:{}", session_id, field)
}

/// The user's answer to a distress check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseChoice {
    #[serde(rename = "Pause Both")]
    PauseBoth,
    #[serde(rename = "Pause Insights Only")]
    PauseInsightsOnly,
    #[serde(rename = "Pause Training Only")]
    PauseTrainingOnly,
    #[serde(rename = "Continue Both")]
    ContinueBoth,
}

/// The pause flags a choice resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseFlags {
    pub pause_aggregation: bool,
    pub pause_training: bool,
}

impl PauseChoice {
    /// The deterministic choice-to-flags table.
    pub fn pause_flags(&self) -> PauseFlags {
        match self {
            PauseChoice::PauseBoth => PauseFlags {
                pause_aggregation: true,
                pause_training: true,
            },
            PauseChoice::PauseInsightsOnly => PauseFlags {
                pause_aggregation: true,
                pause_training: false,
            },
            PauseChoice::PauseTrainingOnly => PauseFlags {
                pause_aggregation: false,
                pause_training: true,
            },
            PauseChoice::ContinueBoth => PauseFlags {
                pause_aggregation: false,
                pause_training: false,
            },
        }
    }
}

/// Snapshot of a session's safety flags; missing keys read as false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    pub session_pause_aggregation: bool,
    pub session_pause_training: bool,
    pub distress_check_performed: bool,
    pub awaiting_distress_check_response: bool,
}
