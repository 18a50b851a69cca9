//! HTTP handlers for bootstrap endpoints.

use std::sync::Arc;

use axum::extract::State;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::json::Json;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::bootstrap::{ResetUserCommand, ResetUserHandler};
use crate::domain::foundation::{SessionId, UserId};

use super::dto::{ResetRequest, ResetResponse};

/// Application state for bootstrap endpoints.
#[derive(Clone)]
pub struct BootstrapAppState {
    pub reset_user: Arc<ResetUserHandler>,
}

/// POST /bootstrap/reset
pub async fn reset(
    State(state): State<BootstrapAppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, ApiError> {
    let user_id = UserId::try_new(&request.user_id)?;
    let session_id = SessionId::try_new(&request.session_id)?;

    state
        .reset_user
        .handle(ResetUserCommand {
            user_id,
            session_id,
        })
        .await?;

    Ok(Json(ResetResponse { success: true }))
}
