use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::assessment::AssessmentEvaluation;
use crate::models::catalog::{Difficulty, MajorCatalogEntry, UniversityCatalogEntry};
use crate::models::profile::StudentProfile;
use crate::models::recommendation::{MajorRecommendation, UniversityRecommendation};
use crate::store::{AdvisorStore, AssessmentSummary, StoredAssessment};

/// PostgreSQL-backed store. Schema: `migrations/0001_advisor_schema.sql`.
#[derive(Clone)]
pub struct PgAdvisorStore {
    pool: PgPool,
}

impl PgAdvisorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool and wraps it.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self::new(pool))
    }
}

#[derive(Debug, FromRow)]
struct MajorRow {
    name: String,
    category: String,
    difficulty: String,
    career_paths: String,
    average_cost: f64,
}

#[derive(Debug, FromRow)]
struct UniversityRow {
    id: i64,
    name: String,
    country: String,
    tuition_fee: f64,
    min_gpa: f64,
    scholarship_available: bool,
    success_weight: f64,
    acceptance_rate: Option<f64>,
    is_active: bool,
    majors: Vec<String>,
}

impl From<UniversityRow> for UniversityCatalogEntry {
    fn from(row: UniversityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            country: row.country,
            tuition_fee: row.tuition_fee,
            min_gpa: row.min_gpa,
            scholarship_available: row.scholarship_available,
            success_weight: row.success_weight,
            acceptance_rate: row.acceptance_rate,
            is_active: row.is_active,
            majors: row.majors,
        }
    }
}

#[derive(Debug, FromRow)]
struct AssessmentRow {
    id: Uuid,
    user_id: Uuid,
    test_type: String,
    personality_type: String,
    scores: Json<BTreeMap<String, f64>>,
    strengths: Json<Vec<String>>,
    weaknesses: Json<Vec<String>>,
    insights: Option<String>,
    completed_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct MajorRecommendationRow {
    major_name: String,
    match_score: f64,
    explanation: String,
    difficulty_level: String,
    career_paths: String,
    estimated_cost: f64,
    study_duration: String,
    roadmap: Json<Vec<String>>,
}

impl From<MajorRecommendationRow> for MajorRecommendation {
    fn from(row: MajorRecommendationRow) -> Self {
        Self {
            major_name: row.major_name,
            match_score: row.match_score,
            explanation: row.explanation,
            difficulty_level: row.difficulty_level,
            career_paths: row.career_paths,
            estimated_cost: row.estimated_cost,
            study_duration: row.study_duration,
            roadmap: row.roadmap.0,
        }
    }
}

#[async_trait]
impl AdvisorStore for PgAdvisorStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<StudentProfile>, AppError> {
        let profile = sqlx::query_as::<_, StudentProfile>(
            r#"
            SELECT gpa, budget, preferred_country, preferred_major, career_goal
            FROM student_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn list_majors(&self) -> Result<Vec<MajorCatalogEntry>, AppError> {
        let rows = sqlx::query_as::<_, MajorRow>(
            "SELECT name, category, difficulty, career_paths, average_cost FROM majors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match Difficulty::parse(&row.difficulty) {
                Some(difficulty) => Some(MajorCatalogEntry {
                    name: row.name,
                    category: row.category,
                    difficulty,
                    career_paths: row.career_paths,
                    average_cost: row.average_cost,
                }),
                None => {
                    warn!(
                        "Skipping major '{}' with unknown difficulty '{}'",
                        row.name, row.difficulty
                    );
                    None
                }
            })
            .collect())
    }

    async fn list_university_candidates(
        &self,
        major: &str,
    ) -> Result<Vec<UniversityCatalogEntry>, AppError> {
        let rows = sqlx::query_as::<_, UniversityRow>(
            r#"
            SELECT u.id, u.name, u.country, u.tuition_fee, u.min_gpa,
                   u.scholarship_available, u.success_weight, u.acceptance_rate,
                   u.is_active, ARRAY_AGG(m.name ORDER BY m.name) AS majors
            FROM universities u
            JOIN university_majors um ON um.university_id = u.id
            JOIN majors m ON m.id = um.major_id
            WHERE u.is_active AND m.name ILIKE $1 ESCAPE '\'
            GROUP BY u.id
            ORDER BY u.success_weight DESC, u.id
            "#,
        )
        .bind(contains_pattern(major))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UniversityCatalogEntry::from).collect())
    }

    async fn save_assessment(
        &self,
        user_id: Uuid,
        test_type: &str,
        evaluation: &AssessmentEvaluation,
        recommendations: &[MajorRecommendation],
    ) -> Result<Uuid, AppError> {
        let result_id = Uuid::new_v4();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO assessment_results
                (id, user_id, test_type, personality_type, scores, strengths, weaknesses, insights)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(result_id)
        .bind(user_id)
        .bind(test_type)
        .bind(&evaluation.personality_type)
        .bind(Json(&evaluation.scores))
        .bind(Json(&evaluation.strengths))
        .bind(Json(&evaluation.weaknesses))
        .bind(evaluation.insights.as_deref())
        .execute(&mut *tx)
        .await?;

        for (rank, rec) in recommendations.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO major_recommendations
                    (assessment_id, user_id, rank, major_name, match_score, explanation,
                     difficulty_level, career_paths, estimated_cost, study_duration, roadmap)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                "#,
            )
            .bind(result_id)
            .bind(user_id)
            .bind(rank as i32)
            .bind(&rec.major_name)
            .bind(rec.match_score)
            .bind(&rec.explanation)
            .bind(&rec.difficulty_level)
            .bind(&rec.career_paths)
            .bind(rec.estimated_cost)
            .bind(&rec.study_duration)
            .bind(Json(&rec.roadmap))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            "Stored assessment {} with {} major recommendations for user {}",
            result_id,
            recommendations.len(),
            user_id
        );
        Ok(result_id)
    }

    async fn get_assessment(
        &self,
        user_id: Uuid,
        result_id: Uuid,
    ) -> Result<Option<StoredAssessment>, AppError> {
        let row = sqlx::query_as::<_, AssessmentRow>(
            r#"
            SELECT id, user_id, test_type, personality_type, scores, strengths,
                   weaknesses, insights, completed_at
            FROM assessment_results
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(result_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let recommendations = sqlx::query_as::<_, MajorRecommendationRow>(
            r#"
            SELECT major_name, match_score, explanation, difficulty_level, career_paths,
                   estimated_cost, study_duration, roadmap
            FROM major_recommendations
            WHERE assessment_id = $1
            ORDER BY match_score DESC, rank
            "#,
        )
        .bind(result_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(StoredAssessment {
            id: row.id,
            user_id: row.user_id,
            test_type: row.test_type,
            evaluation: AssessmentEvaluation {
                personality_type: row.personality_type,
                strengths: row.strengths.0,
                weaknesses: row.weaknesses.0,
                scores: row.scores.0,
                insights: row.insights,
            },
            recommendations: recommendations.into_iter().map(Into::into).collect(),
            completed_at: row.completed_at,
        }))
    }

    async fn list_assessments(&self, user_id: Uuid) -> Result<Vec<AssessmentSummary>, AppError> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            r#"
            SELECT id, test_type, personality_type, completed_at
            FROM assessment_results
            WHERE user_id = $1
            ORDER BY completed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(id, test_type, personality_type, completed_at)| AssessmentSummary {
                    id,
                    test_type,
                    personality_type,
                    completed_at,
                },
            )
            .collect())
    }

    async fn save_university_recommendations(
        &self,
        user_id: Uuid,
        major: &str,
        recommendations: &[UniversityRecommendation],
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for (rank, rec) in recommendations.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO university_recommendations
                    (user_id, major, rank, university_id, recommendation_score, reasons, pros, cons)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(user_id)
            .bind(major)
            .bind(rank as i32)
            .bind(rec.id)
            .bind(rec.recommendation_score)
            .bind(Json(&rec.reasons))
            .bind(Json(&rec.pros))
            .bind(Json(&rec.cons))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// `%needle%` for ILIKE, with LIKE wildcards in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
