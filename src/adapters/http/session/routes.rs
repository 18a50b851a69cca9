//! Axum router configuration for session endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    get_mode, get_settings, pause_update, set_mode, trigger_distress_check,
    update_pause_contributions, SessionAppState,
};

/// Create the session API router.
///
/// # Routes
///
/// - `GET /mode` - Read the conversation mode (query: sessionId)
/// - `PUT /mode` - Set the conversation mode
/// - `PUT /settings/pause-contributions` - User-initiated pause flag update
/// - `POST /pause-update` - Resolve a distress check-in with a pause choice
/// - `POST /distress-check` - Open a distress check-in for the session
/// - `GET /settings` - Safety flag snapshot (query: sessionId)
pub fn session_router() -> Router<SessionAppState> {
    Router::new()
        .route("/mode", get(get_mode).put(set_mode))
        .route(
            "/settings/pause-contributions",
            put(update_pause_contributions),
        )
        .route("/pause-update", post(pause_update))
        .route("/distress-check", post(trigger_distress_check))
        .route("/settings", get(get_settings))
}
