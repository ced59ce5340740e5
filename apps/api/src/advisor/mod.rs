// Recommendation & assessment scoring engine plus its HTTP surface.
// All model calls go through llm_client; every model path has a rule-based fallback.

pub mod evaluator;
pub mod handlers;
pub mod majors;
pub mod pipeline;
pub mod prompts;
pub mod score_model;
pub mod universities;

#[cfg(test)]
pub mod test_support;
