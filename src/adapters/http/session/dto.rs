//! Data transfer objects for session HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::safety::{PauseChoice, SessionSettings};

/// Query string carrying the session identifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: String,
}

/// GET /session/mode response.
#[derive(Debug, Clone, Serialize)]
pub struct ModeResponse {
    pub mode: String,
}

/// PUT /session/mode request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetModeRequest {
    pub session_id: String,
    pub mode: String,
}

/// PUT /session/mode response.
#[derive(Debug, Clone, Serialize)]
pub struct SetModeResponse {
    pub success: bool,
    pub mode: String,
}

/// PUT /session/settings/pause-contributions request. Absent fields leave
/// the corresponding flag untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseContributionsRequest {
    pub session_id: String,
    pub aggregation_paused: Option<bool>,
    pub training_paused: Option<bool>,
}

/// PUT /session/settings/pause-contributions response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseContributionsResponse {
    pub success: bool,
    pub aggregation_paused: bool,
    pub training_paused: bool,
    pub session_id: String,
}

/// POST /session/pause-update request (distress flow resolution).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseUpdateRequest {
    pub session_id: String,
    pub pause_choice: PauseChoice,
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /session/settings response - the flag snapshot serializes with its
/// domain field names (sessionPauseAggregation etc.).
pub type SettingsResponse = SessionSettings;
