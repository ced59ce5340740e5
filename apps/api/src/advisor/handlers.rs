//! Axum route handlers for the Advisor API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advisor::pipeline::{
    run_assessment, run_university_recommendation, EvaluateRequest, UniversityRequest,
};
use crate::errors::AppError;
use crate::models::assessment::AssessmentEvaluation;
use crate::models::recommendation::{MajorRecommendation, UniversityRecommendation};
use crate::state::AppState;
use crate::store::{AssessmentSummary, StoredAssessment};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub result_id: Uuid,
    pub evaluation: AssessmentEvaluation,
    pub recommendations: Vec<MajorRecommendation>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct AssessmentListResponse {
    pub results: Vec<AssessmentSummary>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct UniversityListResponse {
    pub recommendations: Vec<UniversityRecommendation>,
    pub total_count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessment/evaluate
///
/// Evaluates the answers, recommends majors and stores both.
/// Students without a profile get an evaluation and an empty recommendation list.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    if request.test_type.trim().is_empty() {
        return Err(AppError::Validation("test_type cannot be empty".to_string()));
    }

    let outcome = run_assessment(
        state.store.as_ref(),
        state.evaluator.as_ref(),
        state.major_suggester.as_ref(),
        request,
    )
    .await?;

    Ok(Json(EvaluateResponse {
        result_id: outcome.result_id,
        total_count: outcome.recommendations.len(),
        evaluation: outcome.evaluation,
        recommendations: outcome.recommendations,
    }))
}

/// GET /api/v1/assessment/results/:id
pub async fn handle_get_result(
    State(state): State<AppState>,
    Path(result_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<StoredAssessment>, AppError> {
    let stored = state
        .store
        .get_assessment(params.user_id, result_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assessment {result_id} not found")))?;
    Ok(Json(stored))
}

/// GET /api/v1/assessment/my-results
pub async fn handle_my_results(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AssessmentListResponse>, AppError> {
    let results = state.store.list_assessments(params.user_id).await?;
    Ok(Json(AssessmentListResponse {
        total_count: results.len(),
        results,
    }))
}

/// POST /api/v1/universities/recommend
pub async fn handle_recommend_universities(
    State(state): State<AppState>,
    Json(request): Json<UniversityRequest>,
) -> Result<Json<UniversityListResponse>, AppError> {
    if request.preferred_major.trim().is_empty() {
        return Err(AppError::Validation(
            "preferred_major cannot be empty".to_string(),
        ));
    }
    let max_results = request
        .max_results
        .unwrap_or(state.config.max_university_results);
    if max_results == 0 {
        return Err(AppError::Validation(
            "max_results must be at least 1".to_string(),
        ));
    }

    let recommendations =
        run_university_recommendation(state.store.as_ref(), &request, max_results).await?;

    Ok(Json(UniversityListResponse {
        total_count: recommendations.len(),
        recommendations,
    }))
}
