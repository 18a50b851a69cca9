//! HTTP handlers for somatic endpoints.

use std::sync::Arc;

use axum::extract::State;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::json::Json;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::somatic::{
    EvaluateSomaticTriggerCommand, EvaluateSomaticTriggerHandler,
    IsAwaitingSomaticResponseHandler, ResetSomaticStateHandler,
};
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::perception::PerceptionInput;

use super::dto::{
    AwaitingResponse, SomaticProbeRequest, SuccessResponse, TriggerTestRequest,
    TriggerTestResponse,
};

/// Application state for somatic endpoints.
#[derive(Clone)]
pub struct SomaticAppState {
    pub evaluate: Arc<EvaluateSomaticTriggerHandler>,
    pub is_awaiting: Arc<IsAwaitingSomaticResponseHandler>,
    pub reset: Arc<ResetSomaticStateHandler>,
}

/// POST /somatic/trigger-test
pub async fn trigger_test(
    State(state): State<SomaticAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<TriggerTestRequest>,
) -> Result<Json<TriggerTestResponse>, ApiError> {
    let user_id = UserId::try_new(&request.user_id)?;
    let session_id = SessionId::try_new(&request.session_id)?;
    let vad = request.vad.try_into_estimate()?;

    let result = state
        .evaluate
        .handle(EvaluateSomaticTriggerCommand {
            user_id,
            session_id,
            input: PerceptionInput::new(request.user_message),
            vad,
            current_turn: request.current_turn,
        })
        .await?;

    Ok(Json(TriggerTestResponse {
        should_trigger: result.should_trigger(),
        prompt: result.prompt,
    }))
}

/// POST /somatic/awaiting-test
pub async fn awaiting_test(
    State(state): State<SomaticAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<SomaticProbeRequest>,
) -> Result<Json<AwaitingResponse>, ApiError> {
    let session_id = SessionId::try_new(&request.session_id)?;
    let is_awaiting = state.is_awaiting.handle(&session_id).await?;
    Ok(Json(AwaitingResponse { is_awaiting }))
}

/// POST /somatic/reset-test
pub async fn reset_test(
    State(state): State<SomaticAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<SomaticProbeRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let session_id = SessionId::try_new(&request.session_id)?;
    state.reset.handle(&session_id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
