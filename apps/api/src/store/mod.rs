//! Collaborator contracts for profiles, catalogs and results.
//!
//! The recommendation engine never talks to the database itself: handlers load
//! inputs through `AdvisorStore`, call the engine, and hand results back to it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::AssessmentEvaluation;
use crate::models::catalog::{MajorCatalogEntry, UniversityCatalogEntry};
use crate::models::profile::StudentProfile;
use crate::models::recommendation::{MajorRecommendation, UniversityRecommendation};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// A persisted assessment with the majors recommended alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAssessment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub test_type: String,
    pub evaluation: AssessmentEvaluation,
    /// Ordered by match_score descending.
    pub recommendations: Vec<MajorRecommendation>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: Uuid,
    pub test_type: String,
    pub personality_type: String,
    pub completed_at: DateTime<Utc>,
}

#[async_trait]
pub trait AdvisorStore: Send + Sync {
    /// `Ok(None)` means the student has no profile yet.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<StudentProfile>, AppError>;

    async fn list_majors(&self) -> Result<Vec<MajorCatalogEntry>, AppError>;

    /// Active universities offering a major whose name contains `major`.
    async fn list_university_candidates(
        &self,
        major: &str,
    ) -> Result<Vec<UniversityCatalogEntry>, AppError>;

    /// Persists an evaluation and its major recommendations, returning the new result id.
    async fn save_assessment(
        &self,
        user_id: Uuid,
        test_type: &str,
        evaluation: &AssessmentEvaluation,
        recommendations: &[MajorRecommendation],
    ) -> Result<Uuid, AppError>;

    async fn get_assessment(
        &self,
        user_id: Uuid,
        result_id: Uuid,
    ) -> Result<Option<StoredAssessment>, AppError>;

    /// Newest first.
    async fn list_assessments(&self, user_id: Uuid) -> Result<Vec<AssessmentSummary>, AppError>;

    async fn save_university_recommendations(
        &self,
        user_id: Uuid,
        major: &str,
        recommendations: &[UniversityRecommendation],
    ) -> Result<(), AppError>;
}
