//! Application router assembly.
//!
//! Nests the resource routers under their path prefixes, applies the auth
//! middleware, request tracing, and CORS.

use axum::http::{HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::bootstrap::{bootstrap_router, BootstrapAppState};
use super::middleware::{auth_middleware, AuthState};
use super::session::{session_router, SessionAppState};
use super::somatic::{somatic_router, SomaticAppState};

/// Builds the full application router.
pub fn app_router(
    session_state: SessionAppState,
    somatic_state: SomaticAppState,
    bootstrap_state: BootstrapAppState,
    auth: AuthState,
    server: &ServerConfig,
) -> Router {
    let cors = cors_layer(server);

    Router::new()
        .nest("/session", session_router().with_state(session_state))
        .nest("/somatic", somatic_router().with_state(somatic_state))
        .nest("/bootstrap", bootstrap_router().with_state(bootstrap_state))
        .layer(middleware::from_fn_with_state(auth, auth_middleware))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        // No configured origins: local development default.
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(tower_http::cors::Any)
}
