//! Server-rendered pages: the job-profile form and the ranked report.

pub mod handlers;

use askama::Template;

use crate::analysis::report::{AnalysisReport, CandidateOutcome, FAILED_NAME_MARKER};
use crate::intake::catalog::FieldCatalog;

const NO_STRENGTHS: &str = "Nenhum destaque específico identificado.";
const NO_GAPS: &str = "Nenhum gap crítico identificado.";

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub catalog: FieldCatalog,
    pub warning: Option<String>,
}

impl IndexPage {
    pub fn new(warning: Option<String>) -> Self {
        Self {
            catalog: FieldCatalog::new(),
            warning,
        }
    }
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportPage {
    pub rows: Vec<CandidateRow>,
    pub documents_received: usize,
    pub skipped_count: usize,
}

/// One line of the ranking table plus its detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub name: String,
    pub document_name: String,
    pub score_label: String,
    /// Width of the match bar, 0 – 100.
    pub score_bar: u8,
    pub hard_skills: String,
    pub soft_skills: String,
    pub justification: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub failed: bool,
}

impl CandidateRow {
    pub fn from_outcome(outcome: &CandidateOutcome) -> Self {
        match outcome {
            CandidateOutcome::Evaluated {
                document_name,
                result,
            } => Self {
                name: result.candidate_name.clone(),
                document_name: document_name.clone(),
                score_label: format!("{}%", result.score),
                score_bar: result.score,
                hard_skills: result.hard_skills_matched.join(", "),
                soft_skills: result.soft_skills_matched.join(", "),
                justification: result.summary_justification.clone(),
                strengths: or_placeholder(&result.strengths, NO_STRENGTHS),
                gaps: or_placeholder(&result.gaps, NO_GAPS),
                failed: false,
            },
            CandidateOutcome::Failed {
                document_name,
                reason,
            } => Self {
                name: FAILED_NAME_MARKER.to_string(),
                document_name: document_name.clone(),
                score_label: "—".to_string(),
                score_bar: 0,
                hard_skills: String::new(),
                soft_skills: String::new(),
                justification: reason.clone(),
                strengths: vec![],
                gaps: vec![],
                failed: true,
            },
        }
    }
}

fn or_placeholder(items: &[String], placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items.to_vec()
    }
}

impl From<&AnalysisReport> for ReportPage {
    fn from(report: &AnalysisReport) -> Self {
        Self {
            rows: report.candidates.iter().map(CandidateRow::from_outcome).collect(),
            documents_received: report.documents_received,
            skipped_count: report.skipped_documents.len(),
        }
    }
}
