use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One answered question. The shape depends on the test type, so it is kept
/// as an opaque JSON object and passed through verbatim.
pub type AssessmentAnswer = Map<String, Value>;

/// Structured outcome of an assessment. Treated as a value object: built once
/// per submission and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentEvaluation {
    pub personality_type: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    /// category name → 0 – 100
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub insights: Option<String>,
}
