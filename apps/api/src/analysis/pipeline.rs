//! Analysis run: drives every uploaded document through extraction and
//! evaluation, then aggregates the ranked report.
//!
//! Flow per document, strictly sequential in upload order:
//!   extract (blocking pool) → evaluate (one LLM call) → progress tick.
//!
//! Extraction failure drops the document. Evaluation failure keeps it as a
//! `Failed` row. Neither stops the run.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::progress::{Progress, ProgressSink};
use crate::analysis::report::{AnalysisReport, CandidateOutcome};
use crate::evaluation::CandidateEvaluator;
use crate::extraction::TextExtractor;
use crate::models::job::{ApiKey, CandidateDocument, JobContext};

/// Stages a run needs. Cloned out of `AppState` per request.
#[derive(Clone)]
pub struct Analyzer {
    pub extractor: Arc<dyn TextExtractor>,
    pub evaluator: Arc<dyn CandidateEvaluator>,
}

impl Analyzer {
    pub async fn run(
        &self,
        run_id: Uuid,
        api_key: &ApiKey,
        job: &JobContext,
        documents: Vec<CandidateDocument>,
        progress: &dyn ProgressSink,
    ) -> AnalysisReport {
        let total = documents.len();
        info!(
            run_id = %run_id,
            "Starting analysis of {total} document(s) for role {:?}",
            job.role
        );

        let mut candidates = Vec::with_capacity(total);
        let mut skipped = Vec::new();

        for (index, document) in documents.into_iter().enumerate() {
            let span = info_span!("candidate", run_id = %run_id, document = %document.name);
            let outcome = self
                .process_document(api_key, job, &document)
                .instrument(span)
                .await;

            match outcome {
                Some(outcome) => candidates.push(outcome),
                None => skipped.push(document.name.clone()),
            }

            progress.report(&Progress {
                processed: index + 1,
                total,
                document_name: document.name,
            });
        }

        let report = AnalysisReport::new(run_id, total, candidates, skipped);
        info!(
            run_id = %run_id,
            "Analysis finished: {} evaluated, {} failed, {} skipped",
            report.evaluated_count(),
            report.failed_count(),
            report.skipped_documents.len()
        );
        report
    }

    /// `None` means the document produced no text and is left out of the ranking.
    async fn process_document(
        &self,
        api_key: &ApiKey,
        job: &JobContext,
        document: &CandidateDocument,
    ) -> Option<CandidateOutcome> {
        let text = self.extract(document).await?;

        match self.evaluator.evaluate(api_key, &text, job).await {
            Ok(result) => {
                let result = result.with_name_fallback(&document.name);
                info!(score = result.score, "Candidate evaluated");
                Some(CandidateOutcome::Evaluated {
                    document_name: document.name.clone(),
                    result,
                })
            }
            Err(e) => {
                warn!("Evaluation failed: {e}");
                Some(CandidateOutcome::Failed {
                    document_name: document.name.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn extract(&self, document: &CandidateDocument) -> Option<String> {
        let extractor = Arc::clone(&self.extractor);
        let owned = document.clone();
        match tokio::task::spawn_blocking(move || extractor.extract(&owned)).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Extraction task failed: {e}");
                None
            }
        }
    }
}
