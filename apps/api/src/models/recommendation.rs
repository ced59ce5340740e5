use serde::{Deserialize, Serialize};

/// A single suggested major. Also the schema the LLM is asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorRecommendation {
    pub major_name: String,
    pub match_score: f64, // 0.0 – 1.0
    pub explanation: String,
    pub difficulty_level: String,
    pub career_paths: String,
    pub estimated_cost: f64,
    pub study_duration: String,
    #[serde(default)]
    pub roadmap: Vec<String>,
}

/// A ranked university with the reasoning behind its score.
///
/// `recommendation_score` is a relative ranking signal, not a probability. It can
/// leave [0, 1] because scholarship bonuses stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversityRecommendation {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub tuition_fee: f64,
    pub min_gpa: f64,
    pub scholarship_available: bool,
    pub recommendation_score: f64,
    pub reasons: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}
