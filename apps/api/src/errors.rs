use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only pre-flight problems surface here. Per-candidate failures never abort a
/// run; they become report rows or log lines instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Falta a API Key.")]
    MissingApiKey,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message suitable for showing back to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingApiKey => self.to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Multipart(e) => format!("Não foi possível ler o envio: {e}"),
            AppError::Template(_) | AppError::Internal(_) => {
                "Ocorreu um erro interno.".to_string()
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            // Body-limit overflows surface here as 413.
            AppError::Multipart(e) => e.status(),
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::MissingApiKey => ("MISSING_API_KEY", self.user_message()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Multipart(e) if status == StatusCode::PAYLOAD_TOO_LARGE => {
                ("UPLOAD_TOO_LARGE", e.body_text())
            }
            AppError::Multipart(e) => ("MALFORMED_UPLOAD", e.body_text()),
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                ("TEMPLATE_ERROR", "A rendering error occurred".to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                ("INTERNAL_ERROR", "An internal server error occurred".to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
