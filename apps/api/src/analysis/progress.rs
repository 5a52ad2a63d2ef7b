use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;
use uuid::Uuid;

use crate::analysis::report::AnalysisReport;

/// Snapshot emitted after each document finishes, whatever its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
    pub document_name: String,
}

impl Progress {
    /// Completed share of the run, 0.0 – 1.0.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f32 / self.total as f32
        }
    }
}

/// Receives progress as the pipeline advances.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: &Progress);
}

/// Writes progress to the log. Used by the request/response routes.
pub struct LogProgress {
    pub run_id: Uuid,
}

impl ProgressSink for LogProgress {
    fn report(&self, progress: &Progress) {
        info!(
            run_id = %self.run_id,
            document = %progress.document_name,
            "Processed {}/{} documents ({:.0}%)",
            progress.processed,
            progress.total,
            progress.fraction() * 100.0
        );
    }
}

/// Events streamed to SSE clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisEvent {
    Progress {
        processed: usize,
        total: usize,
        fraction: f32,
        document_name: String,
    },
    Completed {
        report: AnalysisReport,
    },
}

impl AnalysisEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisEvent::Progress { .. } => "progress",
            AnalysisEvent::Completed { .. } => "report",
        }
    }
}

impl From<&Progress> for AnalysisEvent {
    fn from(progress: &Progress) -> Self {
        AnalysisEvent::Progress {
            processed: progress.processed,
            total: progress.total,
            fraction: progress.fraction(),
            document_name: progress.document_name.clone(),
        }
    }
}

/// Forwards progress into a channel. A disconnected receiver is ignored:
/// the run finishes regardless of whether anyone is still listening.
pub struct ChannelProgress {
    tx: UnboundedSender<AnalysisEvent>,
}

impl ChannelProgress {
    pub fn new(tx: UnboundedSender<AnalysisEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, progress: &Progress) {
        let _ = self.tx.send(AnalysisEvent::from(progress));
    }
}
