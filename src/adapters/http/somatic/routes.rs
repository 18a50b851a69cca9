//! Axum router configuration for somatic endpoints.

use axum::{routing::post, Router};

use super::handlers::{awaiting_test, reset_test, trigger_test, SomaticAppState};

/// Create the somatic API router.
///
/// # Routes
///
/// - `POST /trigger-test` - Evaluate one turn against the trigger policy
/// - `POST /awaiting-test` - Read the awaiting-response flag
/// - `POST /reset-test` - Clear the awaiting-response flag
pub fn somatic_router() -> Router<SomaticAppState> {
    Router::new()
        .route("/trigger-test", post(trigger_test))
        .route("/awaiting-test", post(awaiting_test))
        .route("/reset-test", post(reset_test))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = somatic_router();
    }
}
