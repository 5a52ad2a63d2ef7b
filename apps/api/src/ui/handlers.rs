//! Axum route handlers for the HTML pages.

use std::convert::Infallible;

use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse, Response,
    },
};
use tokio_stream::{wrappers::UnboundedReceiverStream, StreamExt};
use tracing::warn;
use uuid::Uuid;

use crate::analysis::handlers::{spawn_streamed_run, to_sse_event};
use crate::analysis::progress::{AnalysisEvent, LogProgress};
use crate::errors::AppError;
use crate::intake::multipart::{AnalysisSubmission, ValidatedRun};
use crate::state::AppState;
use crate::ui::{IndexPage, ReportPage};

/// GET /
pub async fn handle_index() -> Result<Html<String>, AppError> {
    Ok(Html(IndexPage::new(None).render()?))
}

/// POST /analyze
///
/// Runs the analysis and renders the ranking. Pre-flight failures re-render
/// the form with the warning instead of starting the run.
pub async fn handle_analyze_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let run = match accept_submission(multipart).await {
        Ok(run) => run,
        Err(rejection) => return Ok(rejection),
    };

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

    Ok(Html(ReportPage::from(&report).render()?).into_response())
}

/// POST /analyze/stream
///
/// Used by the form's script: `progress` events drive the progress bar and a
/// final `page` event carries the rendered ranking.
pub async fn handle_analyze_form_stream(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let run = match accept_submission(multipart).await {
        Ok(run) => run,
        Err(rejection) => return rejection,
    };

    let rx = spawn_streamed_run(state.analyzer.clone(), run);
    let stream = UnboundedReceiverStream::new(rx)
        .map(|event| Ok::<_, Infallible>(to_page_event(&event)));
    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

/// Parses and validates the form, or builds the page to send back instead.
async fn accept_submission(multipart: Multipart) -> Result<ValidatedRun, Response> {
    let err = match AnalysisSubmission::from_multipart(multipart)
        .await
        .and_then(AnalysisSubmission::validate)
    {
        Ok(run) => return Ok(run),
        Err(err) => err,
    };

    match err {
        AppError::MissingApiKey | AppError::Validation(_) | AppError::Multipart(_) => {
            warn!("Rejected analysis submission: {err}");
            match IndexPage::new(Some(err.user_message())).render() {
                Ok(page) => Err((err.status(), Html(page)).into_response()),
                Err(render_err) => Err(AppError::from(render_err).into_response()),
            }
        }
        other => Err(other.into_response()),
    }
}

fn to_page_event(event: &AnalysisEvent) -> Event {
    match event {
        AnalysisEvent::Completed { report } => match ReportPage::from(report).render() {
            // SSE data may not carry carriage returns.
            Ok(html) => Event::default().event("page").data(html.replace('\r', "")),
            Err(e) => {
                warn!("Failed to render report page: {e}");
                Event::default().event("error").data("render_error")
            }
        },
        progress => to_sse_event(progress),
    }
}
