//! Domain error to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// JSON error body. `failed_flags` appears only on partial failures, per
/// the pause-contributions contract.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "failedFlags")]
    pub failed_flags: Option<Vec<String>>,
}

/// Response wrapper for domain errors.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::ConsentDenied => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound | ErrorCode::SessionNotFound | ErrorCode::AttachmentNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::CheckInAlreadyPending | ErrorCode::InvalidStateTransition => {
            StatusCode::CONFLICT
        }
        ErrorCode::GraphStoreError
        | ErrorCode::CacheError
        | ErrorCode::PartialFailure
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0.message, "request failed");
        }

        let failed_flags = self.0.details.get("failedFlags").map(|joined| {
            joined
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        });

        let body = ErrorBody {
            error: self.0.message,
            code: self.0.code.to_string(),
            failed_flags,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(status_for(ErrorCode::OutOfRange), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::EmptyField), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn consent_denied_maps_to_403() {
        assert_eq!(status_for(ErrorCode::ConsentDenied), StatusCode::FORBIDDEN);
    }

    #[test]
    fn partial_failure_maps_to_500_with_flag_list() {
        let err = ApiError(DomainError::partial_failure(
            "Some flags did not persist",
            &["pauseAggregation", "pauseTraining"],
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn check_in_already_pending_maps_to_409() {
        assert_eq!(
            status_for(ErrorCode::CheckInAlreadyPending),
            StatusCode::CONFLICT
        );
    }
}
