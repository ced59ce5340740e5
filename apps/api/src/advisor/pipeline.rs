//! Advisor pipelines — glue between the store and the recommendation engine.
//!
//! Assessment flow: evaluate answers → load profile → suggest majors → persist.
//! University flow: load profile → load candidates → score → persist.
//!
//! A missing profile is not an error: the student simply gets no recommendations.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::advisor::evaluator::Evaluator;
use crate::advisor::majors::MajorSuggester;
use crate::advisor::universities::recommend_universities;
use crate::errors::AppError;
use crate::models::assessment::{AssessmentAnswer, AssessmentEvaluation};
use crate::models::recommendation::{MajorRecommendation, UniversityRecommendation};
use crate::store::AdvisorStore;

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRequest {
    pub user_id: Uuid,
    pub test_type: String,
    pub answers: Vec<AssessmentAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub result_id: Uuid,
    pub evaluation: AssessmentEvaluation,
    pub recommendations: Vec<MajorRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UniversityRequest {
    pub user_id: Uuid,
    pub preferred_major: String,
    pub max_results: Option<usize>,
}

/// Evaluates an assessment, recommends majors for the student and persists both.
pub async fn run_assessment(
    store: &dyn AdvisorStore,
    evaluator: &dyn Evaluator,
    suggester: &dyn MajorSuggester,
    request: EvaluateRequest,
) -> Result<AssessmentOutcome, AppError> {
    // Step 1: evaluation always completes, model or fallback
    let evaluation = evaluator
        .evaluate(&request.test_type, &request.answers)
        .await;
    info!(
        "Evaluated {} assessment for user {}: personality_type={}",
        request.test_type, request.user_id, evaluation.personality_type
    );

    // Step 2: majors, only when a profile exists
    let recommendations = match store.get_profile(request.user_id).await? {
        Some(profile) => {
            let catalog = store.list_majors().await?;
            suggester.suggest(&profile, &catalog, &evaluation).await
        }
        None => {
            info!(
                "No profile for user {}, skipping major recommendations",
                request.user_id
            );
            Vec::new()
        }
    };

    // Step 3: persist
    let result_id = store
        .save_assessment(
            request.user_id,
            &request.test_type,
            &evaluation,
            &recommendations,
        )
        .await?;

    Ok(AssessmentOutcome {
        result_id,
        evaluation,
        recommendations,
    })
}

/// Ranks universities offering the requested major and persists the ranking.
pub async fn run_university_recommendation(
    store: &dyn AdvisorStore,
    request: &UniversityRequest,
    max_results: usize,
) -> Result<Vec<UniversityRecommendation>, AppError> {
    let Some(profile) = store.get_profile(request.user_id).await? else {
        info!(
            "No profile for user {}, skipping university recommendations",
            request.user_id
        );
        return Ok(Vec::new());
    };

    let catalog = store
        .list_university_candidates(&request.preferred_major)
        .await?;
    let recommendations =
        recommend_universities(&profile, &request.preferred_major, &catalog, max_results);
    info!(
        "Recommended {}/{} universities for user {} (major: {})",
        recommendations.len(),
        catalog.len(),
        request.user_id,
        request.preferred_major
    );

    store
        .save_university_recommendations(
            request.user_id,
            &request.preferred_major,
            &recommendations,
        )
        .await?;

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::evaluator::RuleBasedEvaluator;
    use crate::advisor::majors::RuleBasedMajorSuggester;
    use crate::advisor::test_support::{seeded_store, STUDENT};

    fn evaluate_request(user_id: Uuid) -> EvaluateRequest {
        EvaluateRequest {
            user_id,
            test_type: "personality".to_string(),
            answers: vec![],
        }
    }

    #[tokio::test]
    async fn test_assessment_recommends_and_persists() {
        let store = seeded_store();
        let outcome = run_assessment(
            &store,
            &RuleBasedEvaluator,
            &RuleBasedMajorSuggester,
            evaluate_request(STUDENT),
        )
        .await
        .unwrap();

        assert_eq!(outcome.evaluation.personality_type, "Balanced");
        assert!(!outcome.recommendations.is_empty());
        assert_eq!(outcome.recommendations[0].major_name, "Computer Science");

        let stored = store
            .get_assessment(STUDENT, outcome.result_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.recommendations, outcome.recommendations);
    }

    #[tokio::test]
    async fn test_assessment_without_profile_still_evaluates() {
        let store = seeded_store();
        let stranger = Uuid::new_v4();
        let outcome = run_assessment(
            &store,
            &RuleBasedEvaluator,
            &RuleBasedMajorSuggester,
            evaluate_request(stranger),
        )
        .await
        .unwrap();

        assert!(outcome.recommendations.is_empty());
        assert_eq!(store.list_assessments(stranger).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_university_recommendation_without_profile_is_empty() {
        let store = seeded_store();
        let request = UniversityRequest {
            user_id: Uuid::new_v4(),
            preferred_major: "Computer Science".to_string(),
            max_results: None,
        };
        let recs = run_university_recommendation(&store, &request, 10)
            .await
            .unwrap();
        assert!(recs.is_empty());
        assert!(store.university_results.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_university_recommendation_persists_ranking() {
        let store = seeded_store();
        let request = UniversityRequest {
            user_id: STUDENT,
            preferred_major: "computer".to_string(),
            max_results: None,
        };
        let recs = run_university_recommendation(&store, &request, 10)
            .await
            .unwrap();

        // University 3 requires a 3.9 GPA and is dropped
        let ids: Vec<_> = recs.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let saved = store.university_results.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].2, recs);
    }
}
