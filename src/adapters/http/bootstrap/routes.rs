//! Axum router configuration for bootstrap endpoints.

use axum::{routing::post, Router};

use super::handlers::{reset, BootstrapAppState};

/// Create the bootstrap API router.
///
/// # Routes
///
/// - `POST /reset` - Reset a user's graph state and session flags
pub fn bootstrap_router() -> Router<BootstrapAppState> {
    Router::new().route("/reset", post(reset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_are_defined() {
        let _router = bootstrap_router();
    }
}
