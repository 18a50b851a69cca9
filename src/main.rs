//! Attune server binary.
//!
//! Loads configuration, connects the Postgres graph store and the Redis
//! ephemeral store, wires the handlers, and serves the HTTP API.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attune::adapters::classifier::HeuristicClassifier;
use attune::adapters::http::{app_router, BootstrapAppState, SessionAppState, SomaticAppState};
use attune::adapters::memory::MockSessionValidator;
use attune::adapters::postgres::{PostgresConsentReader, PostgresGraphStore};
use attune::adapters::redis_store::RedisEphemeralStore;
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
use attune::config::AppConfig;
use attune::domain::appraisal::AppraisalEngine;
use attune::ports::{EphemeralStore, GraphStateStore, SessionValidator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        environment = ?config.server.environment,
        "starting attune"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("migrations applied");
    }
    info!("connected to postgres");

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_tokio_connection().await?;
    info!("connected to redis");

    let graph: Arc<dyn GraphStateStore> = Arc::new(PostgresGraphStore::new(pool.clone()));
    let ephemeral: Arc<dyn EphemeralStore> = Arc::new(RedisEphemeralStore::new(
        redis_conn,
        config.safety.flag_ttl_secs,
    ));
    let consent_gate = ConsentGate::new(Arc::new(PostgresConsentReader::new(pool)));

    // Identity is external; until a production validator is wired in, any
    // non-empty bearer token authenticates as that user id.
    if config.is_production() {
        warn!("running with the development token validator in production");
    }
    let validator: Arc<dyn SessionValidator> = Arc::new(MockSessionValidator::accepting_any_token());

    let session_state = SessionAppState {
        get_mode: Arc::new(GetSessionModeHandler::new(ephemeral.clone())),
        set_mode: Arc::new(SetSessionModeHandler::new(ephemeral.clone())),
        update_pause: Arc::new(UpdatePauseSettingsHandler::new(ephemeral.clone())),
        apply_choice: Arc::new(ApplyPauseChoiceHandler::new(ephemeral.clone())),
        get_settings: Arc::new(GetSessionSettingsHandler::new(ephemeral.clone())),
        trigger_check: Arc::new(TriggerDistressCheckHandler::new(ephemeral.clone())),
    };

    let somatic_state = SomaticAppState {
        evaluate: Arc::new(EvaluateSomaticTriggerHandler::new(
            consent_gate.clone(),
            ephemeral.clone(),
            Arc::new(HeuristicClassifier::new()),
            AppraisalEngine::new(config.safety.appraisal.clone()),
            config.safety.somatic.clone(),
            Arc::new(TemplatePromptRenderer::new()),
        )),
        is_awaiting: Arc::new(IsAwaitingSomaticResponseHandler::new(ephemeral.clone())),
        reset: Arc::new(ResetSomaticStateHandler::new(ephemeral.clone())),
    };

    let bootstrap_state = BootstrapAppState {
        reset_user: Arc::new(ResetUserHandler::new(consent_gate, graph, ephemeral)),
    };

    let app = app_router(
        session_state,
        somatic_state,
        bootstrap_state,
        validator,
        &config.server,
    );

    let addr = config.server.socket_addr();
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
