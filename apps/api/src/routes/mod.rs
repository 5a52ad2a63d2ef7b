pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;
use crate::ui::handlers as pages;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::handle_index))
        .route("/analyze", post(pages::handle_analyze_form))
        .route("/analyze/stream", post(pages::handle_analyze_form_stream))
        // Analysis API
        .route("/api/v1/options", get(handlers::handle_options))
        .route("/api/v1/analyses", post(handlers::handle_analyze))
        .route(
            "/api/v1/analyses/stream",
            post(handlers::handle_analyze_stream),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
