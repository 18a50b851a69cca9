//! Data transfer objects for bootstrap HTTP endpoints.

use serde::{Deserialize, Serialize};

/// POST /bootstrap/reset request. The field casing (`userID`, `sessionID`)
/// is part of the published contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

/// POST /bootstrap/reset response.
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub success: bool,
}
