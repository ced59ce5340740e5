use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and which evaluation backend is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let backend = match &state.config.llm {
        Some(llm) => llm.model.as_str(),
        None => "rule-based",
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "advisor-api",
        "evaluation_backend": backend
    }))
}
