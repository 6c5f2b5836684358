//! Application error handling

use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medicue_core::{ErrorCode, ErrorOutcome, ReportError};

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Report(ReportError),
    BadRequest(String),
    AiUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, outcome) = match self {
            AppError::Report(err) => {
                let status = match err {
                    ReportError::Unreadable(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    ReportError::MissingFile | ReportError::TooShort => StatusCode::BAD_REQUEST,
                };
                if status.is_server_error() {
                    tracing::error!(error = %err, "Report ingestion failed");
                }
                (status, ErrorOutcome::new(err.code(), &err.to_string()))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorOutcome::invalid(&msg)),
            AppError::AiUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorOutcome::new(ErrorCode::AiUnavailable, &msg),
            ),
        };

        (status, Json(outcome)).into_response()
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::Report(err)
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
