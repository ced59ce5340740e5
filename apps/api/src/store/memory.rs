//! In-memory `AdvisorStore` for handler and pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::AssessmentEvaluation;
use crate::models::catalog::{MajorCatalogEntry, UniversityCatalogEntry};
use crate::models::profile::StudentProfile;
use crate::models::recommendation::{MajorRecommendation, UniversityRecommendation};
use crate::store::{AdvisorStore, AssessmentSummary, StoredAssessment};

#[derive(Default)]
pub struct MemoryStore {
    pub profiles: HashMap<Uuid, StudentProfile>,
    pub majors: Vec<MajorCatalogEntry>,
    pub universities: Vec<UniversityCatalogEntry>,
    pub assessments: Mutex<Vec<StoredAssessment>>,
    pub university_results: Mutex<Vec<(Uuid, String, Vec<UniversityRecommendation>)>>,
}

#[async_trait]
impl AdvisorStore for MemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<StudentProfile>, AppError> {
        Ok(self.profiles.get(&user_id).cloned())
    }

    async fn list_majors(&self) -> Result<Vec<MajorCatalogEntry>, AppError> {
        Ok(self.majors.clone())
    }

    async fn list_university_candidates(
        &self,
        major: &str,
    ) -> Result<Vec<UniversityCatalogEntry>, AppError> {
        Ok(self
            .universities
            .iter()
            .filter(|u| u.is_active && u.offers_major(major))
            .cloned()
            .collect())
    }

    async fn save_assessment(
        &self,
        user_id: Uuid,
        test_type: &str,
        evaluation: &AssessmentEvaluation,
        recommendations: &[MajorRecommendation],
    ) -> Result<Uuid, AppError> {
        let mut assessments = self.assessments.lock().unwrap();
        let id = Uuid::new_v4();
        // strictly increasing timestamps keep "newest first" deterministic
        let completed_at = Utc::now() + Duration::seconds(assessments.len() as i64);
        assessments.push(StoredAssessment {
            id,
            user_id,
            test_type: test_type.to_string(),
            evaluation: evaluation.clone(),
            recommendations: recommendations.to_vec(),
            completed_at,
        });
        Ok(id)
    }

    async fn get_assessment(
        &self,
        user_id: Uuid,
        result_id: Uuid,
    ) -> Result<Option<StoredAssessment>, AppError> {
        let assessments = self.assessments.lock().unwrap();
        Ok(assessments
            .iter()
            .find(|a| a.id == result_id && a.user_id == user_id)
            .cloned())
    }

    async fn list_assessments(&self, user_id: Uuid) -> Result<Vec<AssessmentSummary>, AppError> {
        let assessments = self.assessments.lock().unwrap();
        let mut summaries: Vec<_> = assessments
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| AssessmentSummary {
                id: a.id,
                test_type: a.test_type.clone(),
                personality_type: a.evaluation.personality_type.clone(),
                completed_at: a.completed_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(summaries)
    }

    async fn save_university_recommendations(
        &self,
        user_id: Uuid,
        major: &str,
        recommendations: &[UniversityRecommendation],
    ) -> Result<(), AppError> {
        self.university_results.lock().unwrap().push((
            user_id,
            major.to_string(),
            recommendations.to_vec(),
        ));
        Ok(())
    }
}
