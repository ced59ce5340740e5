mod advisor;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisor::evaluator::{Evaluator, LlmEvaluator, RuleBasedEvaluator};
use crate::advisor::majors::{LlmMajorSuggester, MajorSuggester, RuleBasedMajorSuggester};
use crate::config::Config;
use crate::llm_client::{CompletionBackend, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgAdvisorStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Advisor API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let store = Arc::new(PgAdvisorStore::connect(&config.database_url).await?);

    // Evaluation backends: model-backed with rule-based fall-through, or rule-based only
    let (evaluator, major_suggester) = build_backends(&config);

    let state = AppState {
        store,
        evaluator,
        major_suggester,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_backends(config: &Config) -> (Arc<dyn Evaluator>, Arc<dyn MajorSuggester>) {
    let Some(llm_config) = config.llm.clone() else {
        info!("OLLAMA_BASE_URL not set, using rule-based evaluation");
        return (Arc::new(RuleBasedEvaluator), Arc::new(RuleBasedMajorSuggester));
    };

    match LlmClient::new(llm_config) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", client.model());
            let backend: Arc<dyn CompletionBackend> = Arc::new(client);
            (
                Arc::new(LlmEvaluator::new(backend.clone())),
                Arc::new(LlmMajorSuggester::new(backend)),
            )
        }
        Err(e) => {
            warn!("LLM client unavailable, using rule-based evaluation: {e}");
            (Arc::new(RuleBasedEvaluator), Arc::new(RuleBasedMajorSuggester))
        }
    }
}
