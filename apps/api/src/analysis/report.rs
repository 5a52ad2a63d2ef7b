//! Aggregated, ranked output of one analysis run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::models::evaluation::EvaluationResult;

/// Name shown for candidates whose evaluation could not be completed.
pub const FAILED_NAME_MARKER: &str = "Erro Leitura";

/// What happened to one document that produced text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateOutcome {
    Evaluated {
        document_name: String,
        #[serde(flatten)]
        result: EvaluationResult,
    },
    Failed {
        document_name: String,
        reason: String,
    },
}

impl CandidateOutcome {
    pub fn document_name(&self) -> &str {
        match self {
            CandidateOutcome::Evaluated { document_name, .. }
            | CandidateOutcome::Failed { document_name, .. } => document_name,
        }
    }

    /// `None` for failures, so they rank below every real score.
    pub fn score(&self) -> Option<u8> {
        match self {
            CandidateOutcome::Evaluated { result, .. } => Some(result.score),
            CandidateOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CandidateOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub documents_received: usize,
    /// Ranked best first. One row per document that yielded text.
    pub candidates: Vec<CandidateOutcome>,
    /// Documents dropped because no text could be extracted.
    pub skipped_documents: Vec<String>,
}

impl AnalysisReport {
    pub fn new(
        run_id: Uuid,
        documents_received: usize,
        mut candidates: Vec<CandidateOutcome>,
        skipped_documents: Vec<String>,
    ) -> Self {
        rank(&mut candidates);
        debug!(
            "Ranking: {:?}",
            candidates
                .iter()
                .map(|c| (c.document_name(), c.score()))
                .collect::<Vec<_>>()
        );
        Self {
            run_id,
            generated_at: Utc::now(),
            documents_received,
            candidates,
            skipped_documents,
        }
    }

    pub fn evaluated_count(&self) -> usize {
        self.candidates.iter().filter(|c| !c.is_failed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_failed()).count()
    }
}

/// Stable sort by score descending; ties keep upload order, failures go last.
pub fn rank(candidates: &mut [CandidateOutcome]) {
    candidates.sort_by(|a, b| b.score().cmp(&a.score()));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn evaluated(name: &str, score: u8) -> CandidateOutcome {
        CandidateOutcome::Evaluated {
            document_name: format!("{name}.pdf"),
            result: EvaluationResult {
                candidate_name: name.to_string(),
                score,
                hard_skills_matched: vec!["Python".to_string()],
                soft_skills_matched: vec![],
                strengths: vec![],
                gaps: vec![],
                summary_justification: String::new(),
            },
        }
    }

    pub(crate) fn failed(name: &str) -> CandidateOutcome {
        CandidateOutcome::Failed {
            document_name: format!("{name}.pdf"),
            reason: "Erro API: timeout".to_string(),
        }
    }

    fn names(candidates: &[CandidateOutcome]) -> Vec<&str> {
        candidates.iter().map(|c| c.document_name()).collect()
    }

    #[test]
    fn test_rank_orders_by_score_descending() {
        let mut candidates = vec![evaluated("a", 40), evaluated("b", 90), evaluated("c", 65)];
        rank(&mut candidates);
        assert_eq!(names(&candidates), vec!["b.pdf", "c.pdf", "a.pdf"]);
    }

    #[test]
    fn test_rank_keeps_upload_order_on_ties() {
        let mut candidates = vec![evaluated("first", 70), evaluated("second", 70)];
        rank(&mut candidates);
        assert_eq!(names(&candidates), vec!["first.pdf", "second.pdf"]);
    }

    #[test]
    fn test_failures_rank_below_zero_scores() {
        let mut candidates = vec![failed("broken"), evaluated("weak", 0), evaluated("ok", 50)];
        rank(&mut candidates);
        assert_eq!(names(&candidates), vec!["ok.pdf", "weak.pdf", "broken.pdf"]);
    }

    #[test]
    fn test_report_counts() {
        let report = AnalysisReport::new(
            Uuid::new_v4(),
            4,
            vec![evaluated("a", 10), failed("b"), evaluated("c", 20)],
            vec!["d.pdf".to_string()],
        );
        assert_eq!(report.evaluated_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert!(report.candidates.len() <= report.documents_received);
    }

    #[test]
    fn test_outcome_serializes_flat_with_status() {
        let value = serde_json::to_value(evaluated("ana", 77)).unwrap();
        assert_eq!(value["status"], "evaluated");
        assert_eq!(value["score"], 77);
        assert_eq!(value["candidato_nome"], "ana");
        assert_eq!(value["document_name"], "ana.pdf");

        let value = serde_json::to_value(failed("x")).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["reason"], "Erro API: timeout");
    }
}
