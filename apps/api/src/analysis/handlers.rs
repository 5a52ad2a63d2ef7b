//! Axum route handlers for the Analysis API.

use std::convert::Infallible;

use axum::{
    extract::{Multipart, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio_stream::{wrappers::UnboundedReceiverStream, Stream, StreamExt};
use tracing::warn;
use uuid::Uuid;

use crate::analysis::pipeline::Analyzer;
use crate::analysis::progress::{AnalysisEvent, ChannelProgress, LogProgress};
use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::intake::catalog::FieldCatalog;
use crate::intake::multipart::{AnalysisSubmission, ValidatedRun};
use crate::state::AppState;

/// GET /api/v1/options
///
/// Closed-choice lists for building a job-profile form client-side.
pub async fn handle_options() -> Json<FieldCatalog> {
    Json(FieldCatalog::new())
}

/// POST /api/v1/analyses
///
/// Multipart submission → ranked report. Validation errors reject the run
/// before any document is read.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let run = AnalysisSubmission::from_multipart(multipart)
        .await?
        .validate()?;

    let run_id = Uuid::new_v4();
    let report = state
        .analyzer
        .run(
            run_id,
            &run.api_key,
            &run.job,
            run.documents,
            &LogProgress { run_id },
        )
        .await;

    Ok(Json(report))
}

/// POST /api/v1/analyses/stream
///
/// Same input as `/api/v1/analyses`. Streams a `progress` event after each
/// document and a final `report` event.
pub async fn handle_analyze_stream(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let run = AnalysisSubmission::from_multipart(multipart)
        .await?
        .validate()?;

    let rx = spawn_streamed_run(state.analyzer.clone(), run);
    let stream = UnboundedReceiverStream::new(rx).map(|event| Ok(to_sse_event(&event)));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Runs the analysis in the background, forwarding a progress event per
/// document and a final `Completed` event.
pub(crate) fn spawn_streamed_run(
    analyzer: Analyzer,
    run: ValidatedRun,
) -> UnboundedReceiver<AnalysisEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let run_id = Uuid::new_v4();
        let sink = ChannelProgress::new(tx.clone());
        let report = analyzer
            .run(run_id, &run.api_key, &run.job, run.documents, &sink)
            .await;
        if tx.send(AnalysisEvent::Completed { report }).is_err() {
            warn!(run_id = %run_id, "Client left before the report was delivered");
        }
    });

    rx
}

pub(crate) fn to_sse_event(event: &AnalysisEvent) -> Event {
    let sse = Event::default().event(event.name());
    match sse.json_data(event) {
        Ok(sse) => sse,
        Err(e) => {
            warn!("Failed to serialize analysis event: {e}");
            Event::default().event("error").data("serialization_error")
        }
    }
}
