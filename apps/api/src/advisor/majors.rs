//! Major Recommender — ranks majors from the catalog for a student.
//!
//! `RuleBasedMajorSuggester` scores the first `MAX_MAJOR_RECOMMENDATIONS`
//! catalog entries with a fixed heuristic. `LlmMajorSuggester` asks the model
//! and falls through to the heuristic on any failure.
//!
//! Both paths return results sorted by `match_score` descending. The sort is
//! stable, so equal scores keep catalog order.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

use crate::advisor::prompts::{MAJOR_PROMPT_TEMPLATE, MAJOR_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{complete_json, CompletionBackend, LlmError};
use crate::models::assessment::AssessmentEvaluation;
use crate::models::catalog::{Difficulty, MajorCatalogEntry};
use crate::models::profile::StudentProfile;
use crate::models::recommendation::MajorRecommendation;

pub const MAX_MAJOR_RECOMMENDATIONS: usize = 7;

const BASE_SCORE: f64 = 0.6;
const PREFERRED_MAJOR_BONUS: f64 = 0.3;
const MEDIUM_DIFFICULTY_BONUS: f64 = 0.1;

const FALLBACK_STUDY_DURATION: &str = "3-4 years";

const FALLBACK_ROADMAP: &[&str] = &[
    "Complete foundational courses",
    "Develop core skills and knowledge",
    "Gain practical experience through internships",
    "Complete advanced specialization courses",
    "Work on capstone project or thesis",
];

/// Swappable major recommendation backend. Carried in `AppState` as
/// `Arc<dyn MajorSuggester>`.
#[async_trait]
pub trait MajorSuggester: Send + Sync {
    async fn suggest(
        &self,
        profile: &StudentProfile,
        catalog: &[MajorCatalogEntry],
        evaluation: &AssessmentEvaluation,
    ) -> Vec<MajorRecommendation>;
}

pub struct RuleBasedMajorSuggester;

#[async_trait]
impl MajorSuggester for RuleBasedMajorSuggester {
    async fn suggest(
        &self,
        profile: &StudentProfile,
        catalog: &[MajorCatalogEntry],
        _evaluation: &AssessmentEvaluation,
    ) -> Vec<MajorRecommendation> {
        rule_based_recommendations(profile, catalog)
    }
}

/// Heuristic scoring of the first `MAX_MAJOR_RECOMMENDATIONS` catalog entries:
/// 0.6 base, +0.3 when the preferred major appears in the name, +0.1 for
/// Medium difficulty, capped at 1.0.
pub fn rule_based_recommendations(
    profile: &StudentProfile,
    catalog: &[MajorCatalogEntry],
) -> Vec<MajorRecommendation> {
    let preferred = profile
        .preferred_major
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_lowercase);

    let recommendations = catalog
        .iter()
        .take(MAX_MAJOR_RECOMMENDATIONS)
        .map(|major| {
            let mut score = BASE_SCORE;
            if let Some(preferred) = &preferred {
                if major.name.to_lowercase().contains(preferred.as_str()) {
                    score += PREFERRED_MAJOR_BONUS;
                }
            }
            if major.difficulty == Difficulty::Medium {
                score += MEDIUM_DIFFICULTY_BONUS;
            }

            MajorRecommendation {
                major_name: major.name.clone(),
                match_score: round_score(score).min(1.0),
                explanation: format!(
                    "Good fit based on your profile and interests in {}",
                    major.category
                ),
                difficulty_level: major.difficulty.as_str().to_string(),
                career_paths: major.career_paths.clone(),
                estimated_cost: major.average_cost,
                study_duration: FALLBACK_STUDY_DURATION.to_string(),
                roadmap: FALLBACK_ROADMAP.iter().map(|s| s.to_string()).collect(),
            }
        })
        .collect();

    rank(recommendations)
}

#[derive(Debug, Deserialize)]
struct MajorRecommendationsReply {
    recommendations: Vec<MajorRecommendation>,
}

/// Model-backed major recommendation with rule-based fall-through.
pub struct LlmMajorSuggester {
    backend: Arc<dyn CompletionBackend>,
}

impl LlmMajorSuggester {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    async fn try_suggest(
        &self,
        profile: &StudentProfile,
        catalog: &[MajorCatalogEntry],
        evaluation: &AssessmentEvaluation,
    ) -> Result<Vec<MajorRecommendation>, LlmError> {
        let prompt = build_major_prompt(profile, catalog, evaluation)?;
        let system = format!("{MAJOR_SYSTEM} {JSON_ONLY_INSTRUCTION}");
        let reply: MajorRecommendationsReply =
            complete_json(self.backend.as_ref(), &prompt, &system).await?;
        if reply.recommendations.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        let recommendations = reply
            .recommendations
            .into_iter()
            .map(|mut r| {
                r.match_score = r.match_score.clamp(0.0, 1.0);
                r
            })
            .collect();
        Ok(rank(recommendations))
    }
}

#[async_trait]
impl MajorSuggester for LlmMajorSuggester {
    async fn suggest(
        &self,
        profile: &StudentProfile,
        catalog: &[MajorCatalogEntry],
        evaluation: &AssessmentEvaluation,
    ) -> Vec<MajorRecommendation> {
        match self.try_suggest(profile, catalog, evaluation).await {
            Ok(recommendations) => {
                info!(
                    "LLM suggested {} majors (top: {})",
                    recommendations.len(),
                    recommendations[0].major_name
                );
                recommendations
            }
            Err(e) => {
                warn!("LLM major recommendation unavailable, using rule-based fallback: {e}");
                rule_based_recommendations(profile, catalog)
            }
        }
    }
}

/// Two-decimal rounding so bonus sums land on exact tenths (0.6 + 0.3 + 0.1 == 1.0).
fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Stable sort by `match_score` descending, truncated to the maximum count.
fn rank(mut recommendations: Vec<MajorRecommendation>) -> Vec<MajorRecommendation> {
    recommendations.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    recommendations.truncate(MAX_MAJOR_RECOMMENDATIONS);
    recommendations
}

fn build_major_prompt(
    profile: &StudentProfile,
    catalog: &[MajorCatalogEntry],
    evaluation: &AssessmentEvaluation,
) -> Result<String, LlmError> {
    let catalog_json = serde_json::to_string_pretty(
        &catalog
            .iter()
            .map(|m| {
                serde_json::json!({
                    "name": m.name,
                    "category": m.category,
                    "difficulty": m.difficulty.as_str(),
                    "career_paths": m.career_paths,
                    "average_cost": m.average_cost,
                })
            })
            .collect::<Vec<_>>(),
    )?;

    let or_unspecified = |v: &Option<String>| {
        v.clone()
            .unwrap_or_else(|| "Not specified".to_string())
    };

    Ok(MAJOR_PROMPT_TEMPLATE
        .replace("{gpa}", &format!("{:.2}", profile.gpa))
        .replace("{budget}", &format!("{:.0}", profile.budget))
        .replace("{preferred_country}", &or_unspecified(&profile.preferred_country))
        .replace("{preferred_major}", &or_unspecified(&profile.preferred_major))
        .replace("{career_goal}", &or_unspecified(&profile.career_goal))
        .replace("{personality_type}", &evaluation.personality_type)
        .replace("{strengths}", &evaluation.strengths.join(", "))
        .replace("{catalog_json}", &catalog_json))
}
