//! Integration tests for the session HTTP endpoints.
//!
//! Runs the full router over in-memory adapters: auth middleware, DTO
//! parsing, flag semantics, and error mapping.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use attune::adapters::classifier::HeuristicClassifier;
use attune::adapters::http::{
    app_router, BootstrapAppState, SessionAppState, SomaticAppState,
};
use attune::adapters::memory::{
    InMemoryConsentStore, InMemoryEphemeralStore, InMemoryGraphStore, MockSessionValidator,
};
use attune::adapters::renderer::TemplatePromptRenderer;
use attune::application::handlers::bootstrap::ResetUserHandler;
use attune::application::handlers::safety::{
    ApplyPauseChoiceHandler, GetSessionSettingsHandler, TriggerDistressCheckHandler,
    UpdatePauseSettingsHandler,
};
use attune::application::handlers::session::{GetSessionModeHandler, SetSessionModeHandler};
use attune::application::handlers::somatic::{
    EvaluateSomaticTriggerHandler, IsAwaitingSomaticResponseHandler, ResetSomaticStateHandler,
};
use attune::application::ConsentGate;
use attune::config::ServerConfig;
use attune::domain::appraisal::{AppraisalEngine, AppraisalParams};
use attune::domain::consent::ConsentProfile;
use attune::domain::foundation::UserId;
use attune::domain::safety::SomaticTriggerPolicy;
use attune::ports::{EphemeralStore, GraphStateStore, SessionValidator};

struct TestApp {
    router: Router,
    ephemeral: Arc<InMemoryEphemeralStore>,
    graph: Arc<InMemoryGraphStore>,
}

fn build_app() -> TestApp {
    let ephemeral = Arc::new(InMemoryEphemeralStore::new());
    let graph = Arc::new(InMemoryGraphStore::new());
    // Onboarding profiles grant data processing; users without one are
    // denied graph mutations.
    let consent = Arc::new(InMemoryConsentStore::new());
    for user in ["u1", "ghost"] {
        consent.put(
            UserId::try_new(user).unwrap(),
            ConsentProfile::onboarding_default(),
        );
    }
    let consent_gate = ConsentGate::new(consent);
    let validator: Arc<dyn SessionValidator> =
        Arc::new(MockSessionValidator::accepting_any_token());

    let eph: Arc<dyn EphemeralStore> = ephemeral.clone();

    let session_state = SessionAppState {
        get_mode: Arc::new(GetSessionModeHandler::new(eph.clone())),
        set_mode: Arc::new(SetSessionModeHandler::new(eph.clone())),
        update_pause: Arc::new(UpdatePauseSettingsHandler::new(eph.clone())),
        apply_choice: Arc::new(ApplyPauseChoiceHandler::new(eph.clone())),
        get_settings: Arc::new(GetSessionSettingsHandler::new(eph.clone())),
        trigger_check: Arc::new(TriggerDistressCheckHandler::new(eph.clone())),
    };

    let somatic_state = SomaticAppState {
        evaluate: Arc::new(EvaluateSomaticTriggerHandler::new(
            consent_gate.clone(),
            eph.clone(),
            Arc::new(HeuristicClassifier::new()),
            AppraisalEngine::new(AppraisalParams::default()),
            SomaticTriggerPolicy::default(),
            Arc::new(TemplatePromptRenderer::new()),
        )),
        is_awaiting: Arc::new(IsAwaitingSomaticResponseHandler::new(eph.clone())),
        reset: Arc::new(ResetSomaticStateHandler::new(eph.clone())),
    };

    let bootstrap_state = BootstrapAppState {
        reset_user: Arc::new(ResetUserHandler::new(consent_gate, graph.clone(), eph)),
    };

    let router = app_router(
        session_state,
        somatic_state,
        bootstrap_state,
        validator,
        &ServerConfig::default(),
    );

    TestApp {
        router,
        ephemeral,
        graph,
    }
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request.header(header::AUTHORIZATION, "Bearer u1")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    authed(Request::builder().method(method).uri(uri))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    authed(Request::builder().method("GET").uri(uri))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn missing_token_is_rejected_with_401() {
    let app = build_app();
    let request = Request::builder()
        .method("GET")
        .uri("/session/mode?sessionId=s1")
        .body(Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unset_mode_reads_as_standard() {
    let app = build_app();
    let response = app
        .router
        .oneshot(get_request("/session/mode?sessionId=s1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "mode": "standard" }));
}

#[tokio::test]
async fn set_mode_round_trips() {
    let app = build_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/session/mode",
            json!({ "sessionId": "s1", "mode": "grounding" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "success": true, "mode": "grounding" })
    );

    let response = app
        .router
        .oneshot(get_request("/session/mode?sessionId=s1"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({ "mode": "grounding" }));
}

#[tokio::test]
async fn missing_body_field_is_a_bad_request() {
    let app = build_app();
    // No "mode" field at all; rejected with 400, not axum's stock 422.
    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/session/mode",
            json!({ "sessionId": "s1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_mode_is_a_bad_request() {
    let app = build_app();
    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/session/mode",
            json!({ "sessionId": "s1", "mode": "  " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pause_contributions_updates_only_requested_flags() {
    let app = build_app();
    let response = app
        .router
        .oneshot(json_request(
            "PUT",
            "/session/settings/pause-contributions",
            json!({ "sessionId": "s1", "aggregationPaused": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "success": true,
            "aggregationPaused": true,
            "trainingPaused": false,
            "sessionId": "s1"
        })
    );
}

#[tokio::test]
async fn pause_update_applies_choice_and_clears_awaiting() {
    let app = build_app();
    app.ephemeral
        .set_flag("session:s1:awaitingDistressCheckResponse", true)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/session/pause-update",
            json!({ "sessionId": "s1", "pauseChoice": "Pause Insights Only" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let response = app
        .router
        .oneshot(get_request("/session/settings?sessionId=s1"))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({
            "sessionPauseAggregation": true,
            "sessionPauseTraining": false,
            "distressCheckPerformed": false,
            "awaitingDistressCheckResponse": false
        })
    );
}

#[tokio::test]
async fn distress_check_sets_flags_in_settings_snapshot() {
    let app = build_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/session/distress-check",
            json!({ "sessionId": "s1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .router
        .oneshot(get_request("/session/settings?sessionId=s1"))
        .await
        .unwrap();
    let settings = body_json(response).await;
    assert_eq!(settings["distressCheckPerformed"], json!(true));
    assert_eq!(settings["awaitingDistressCheckResponse"], json!(true));
}

#[tokio::test]
async fn bootstrap_reset_clears_graph_and_session_key() {
    let app = build_app();
    let uid = attune::domain::foundation::UserId::try_new("u1").unwrap();
    app.graph.create_user(&uid).await.unwrap();
    app.graph.set_bootstrapped(&uid, true).await.unwrap();
    app.ephemeral
        .set_flag("session:s1:awaitingBootstrap", true)
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/bootstrap/reset",
            json!({ "userID": "u1", "sessionID": "s1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let user = app.graph.find_user(&uid).await.unwrap().unwrap();
    assert!(!user.bootstrapping_complete);
    assert!(!app
        .ephemeral
        .get_flag("session:s1:awaitingBootstrap")
        .await
        .unwrap());
}

#[tokio::test]
async fn bootstrap_reset_for_unknown_user_is_404() {
    let app = build_app();
    // "ghost" has consent but no graph node.
    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/bootstrap/reset",
            json!({ "userID": "ghost", "sessionID": "s1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bootstrap_reset_without_consent_is_403() {
    let app = build_app();
    let uid = UserId::try_new("nobody").unwrap();
    app.graph.create_user(&uid).await.unwrap();
    app.graph.set_bootstrapped(&uid, true).await.unwrap();

    // "nobody" never onboarded, so no consent profile exists.
    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/bootstrap/reset",
            json!({ "userID": "nobody", "sessionID": "s1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let user = app.graph.find_user(&uid).await.unwrap().unwrap();
    assert!(user.bootstrapping_complete);
}
