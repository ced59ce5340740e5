//! Assessment Evaluator — turns raw answers into an `AssessmentEvaluation`.
//!
//! Default: `RuleBasedEvaluator` (deterministic, no network).
//! `LlmEvaluator` asks the model first and falls through to the rule-based
//! evaluation on any failure. Evaluation never fails.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::advisor::prompts::{EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{complete_json, CompletionBackend, LlmError};
use crate::models::assessment::{AssessmentAnswer, AssessmentEvaluation};

pub const FALLBACK_PERSONALITY: &str = "Balanced";

const FALLBACK_SCORES: &[(&str, f64)] = &[
    ("analytical_thinking", 70.0),
    ("creativity", 65.0),
    ("problem_solving", 75.0),
    ("communication", 60.0),
];

const FALLBACK_STRENGTHS: &[&str] = &["Problem Solving", "Analytical Thinking", "Adaptability"];

const FALLBACK_WEAKNESSES: &[&str] = &["Time Management", "Public Speaking", "Advanced Mathematics"];

const FALLBACK_INSIGHTS: &str = "Based on your responses, you show strong analytical and \
    problem-solving skills. Consider majors that leverage these strengths.";

/// Swappable evaluation backend. Carried in `AppState` as `Arc<dyn Evaluator>`.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, test_type: &str, answers: &[AssessmentAnswer])
        -> AssessmentEvaluation;
}

/// Deterministic evaluation used when no model is reachable.
/// Returns the same evaluation for every input.
pub struct RuleBasedEvaluator;

impl RuleBasedEvaluator {
    pub fn evaluation(&self) -> AssessmentEvaluation {
        AssessmentEvaluation {
            personality_type: FALLBACK_PERSONALITY.to_string(),
            strengths: FALLBACK_STRENGTHS.iter().map(|s| s.to_string()).collect(),
            weaknesses: FALLBACK_WEAKNESSES.iter().map(|s| s.to_string()).collect(),
            scores: FALLBACK_SCORES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            insights: Some(FALLBACK_INSIGHTS.to_string()),
        }
    }
}

#[async_trait]
impl Evaluator for RuleBasedEvaluator {
    async fn evaluate(
        &self,
        _test_type: &str,
        _answers: &[AssessmentAnswer],
    ) -> AssessmentEvaluation {
        self.evaluation()
    }
}

/// Model-backed evaluation with rule-based fall-through.
pub struct LlmEvaluator {
    backend: Arc<dyn CompletionBackend>,
    fallback: RuleBasedEvaluator,
}

impl LlmEvaluator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            fallback: RuleBasedEvaluator,
        }
    }

    async fn try_evaluate(
        &self,
        test_type: &str,
        answers: &[AssessmentAnswer],
    ) -> Result<AssessmentEvaluation, LlmError> {
        let prompt = build_evaluation_prompt(test_type, answers)?;
        let system = format!("{EVALUATION_SYSTEM} {JSON_ONLY_INSTRUCTION}");
        let evaluation: AssessmentEvaluation =
            complete_json(self.backend.as_ref(), &prompt, &system).await?;
        validate_evaluation(&evaluation)?;
        Ok(clamp_scores(evaluation))
    }
}

#[async_trait]
impl Evaluator for LlmEvaluator {
    async fn evaluate(
        &self,
        test_type: &str,
        answers: &[AssessmentAnswer],
    ) -> AssessmentEvaluation {
        match self.try_evaluate(test_type, answers).await {
            Ok(evaluation) => {
                info!(
                    "LLM evaluation succeeded: personality_type={}",
                    evaluation.personality_type
                );
                evaluation
            }
            Err(e) => {
                warn!("LLM evaluation unavailable, using rule-based fallback: {e}");
                self.fallback.evaluation()
            }
        }
    }
}

fn build_evaluation_prompt(
    test_type: &str,
    answers: &[AssessmentAnswer],
) -> Result<String, LlmError> {
    let answers_json = serde_json::to_string_pretty(answers)?;
    Ok(EVALUATION_PROMPT_TEMPLATE
        .replace("{test_type}", test_type)
        .replace("{answers_json}", &answers_json))
}

/// Rejects replies that parse but miss required content: a personality type,
/// at least one strength and weakness, and every scored category.
fn validate_evaluation(evaluation: &AssessmentEvaluation) -> Result<(), LlmError> {
    if evaluation.personality_type.trim().is_empty() {
        return Err(LlmError::Schema("personality_type is blank".to_string()));
    }
    if evaluation.strengths.is_empty() {
        return Err(LlmError::Schema("strengths is empty".to_string()));
    }
    if evaluation.weaknesses.is_empty() {
        return Err(LlmError::Schema("weaknesses is empty".to_string()));
    }
    let missing: Vec<_> = FALLBACK_SCORES
        .iter()
        .map(|(category, _)| *category)
        .filter(|category| !evaluation.scores.contains_key(*category))
        .collect();
    if !missing.is_empty() {
        return Err(LlmError::Schema(format!(
            "missing score categories: {}",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Keeps model-reported category scores inside 0 – 100.
fn clamp_scores(mut evaluation: AssessmentEvaluation) -> AssessmentEvaluation {
    for score in evaluation.scores.values_mut() {
        *score = score.clamp(0.0, 100.0);
    }
    evaluation
}
