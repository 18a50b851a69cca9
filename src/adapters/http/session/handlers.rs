//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::json::Json;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::safety::{
    ApplyPauseChoiceCommand, ApplyPauseChoiceHandler, GetSessionSettingsHandler,
    TriggerDistressCheckHandler, UpdatePauseSettingsCommand, UpdatePauseSettingsHandler,
};
use crate::application::handlers::session::{GetSessionModeHandler, SetSessionModeHandler};
use crate::domain::foundation::SessionId;

use super::dto::{
    ModeResponse, PauseContributionsRequest, PauseContributionsResponse, PauseUpdateRequest,
    SessionQuery, SetModeRequest, SetModeResponse, SettingsResponse, SuccessResponse,
};

/// Application state for session endpoints.
#[derive(Clone)]
pub struct SessionAppState {
    pub get_mode: Arc<GetSessionModeHandler>,
    pub set_mode: Arc<SetSessionModeHandler>,
    pub update_pause: Arc<UpdatePauseSettingsHandler>,
    pub apply_choice: Arc<ApplyPauseChoiceHandler>,
    pub get_settings: Arc<GetSessionSettingsHandler>,
    pub trigger_check: Arc<TriggerDistressCheckHandler>,
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::try_new(raw).map_err(ApiError::from)
}

/// GET /session/mode?sessionId=
pub async fn get_mode(
    State(state): State<SessionAppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<SessionQuery>,
) -> Result<Json<ModeResponse>, ApiError> {
    let session_id = parse_session_id(&query.session_id)?;
    let mode = state.get_mode.handle(&session_id).await?;
    Ok(Json(ModeResponse { mode }))
}

/// PUT /session/mode
pub async fn set_mode(
    State(state): State<SessionAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<SetModeRequest>,
) -> Result<Json<SetModeResponse>, ApiError> {
    let session_id = parse_session_id(&request.session_id)?;
    state.set_mode.handle(&session_id, &request.mode).await?;
    Ok(Json(SetModeResponse {
        success: true,
        mode: request.mode,
    }))
}

/// PUT /session/settings/pause-contributions
pub async fn update_pause_contributions(
    State(state): State<SessionAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<PauseContributionsRequest>,
) -> Result<Json<PauseContributionsResponse>, ApiError> {
    let session_id = parse_session_id(&request.session_id)?;
    let result = state
        .update_pause
        .handle(UpdatePauseSettingsCommand {
            session_id,
            aggregation_paused: request.aggregation_paused,
            training_paused: request.training_paused,
        })
        .await?;
    Ok(Json(PauseContributionsResponse {
        success: true,
        aggregation_paused: result.aggregation_paused,
        training_paused: result.training_paused,
        session_id: request.session_id,
    }))
}

/// POST /session/pause-update
pub async fn pause_update(
    State(state): State<SessionAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<PauseUpdateRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let session_id = parse_session_id(&request.session_id)?;
    state
        .apply_choice
        .handle(ApplyPauseChoiceCommand {
            session_id,
            choice: request.pause_choice,
        })
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// POST /session/distress-check
pub async fn trigger_distress_check(
    State(state): State<SessionAppState>,
    RequireAuth(_user): RequireAuth,
    Json(query): Json<SessionQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let session_id = parse_session_id(&query.session_id)?;
    state.trigger_check.handle(&session_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /session/settings?sessionId=
pub async fn get_settings(
    State(state): State<SessionAppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<SessionQuery>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let session_id = parse_session_id(&query.session_id)?;
    let settings = state.get_settings.handle(&session_id).await?;
    Ok(Json(settings))
}
