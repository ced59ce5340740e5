use std::sync::Arc;

use crate::advisor::evaluator::Evaluator;
use crate::advisor::majors::MajorSuggester;
use crate::config::Config;
use crate::store::AdvisorStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AdvisorStore>,
    /// Pluggable evaluator. Model-backed when OLLAMA_BASE_URL is set, rule-based otherwise.
    pub evaluator: Arc<dyn Evaluator>,
    pub major_suggester: Arc<dyn MajorSuggester>,
    pub config: Config,
}
