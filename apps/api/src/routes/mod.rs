pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment API
        .route(
            "/api/v1/assessment/evaluate",
            post(handlers::handle_evaluate),
        )
        .route(
            "/api/v1/assessment/results/:id",
            get(handlers::handle_get_result),
        )
        .route(
            "/api/v1/assessment/my-results",
            get(handlers::handle_my_results),
        )
        // University API
        .route(
            "/api/v1/universities/recommend",
            post(handlers::handle_recommend_universities),
        )
        .with_state(state)
}
