use crate::analysis::pipeline::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup: nothing here changes between or during runs.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extractor + evaluator pair. Default: PdfTextExtractor + LlmCandidateEvaluator.
    pub analyzer: Analyzer,
}
