//! AI connectivity check endpoint

use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::ai::{ClaudeClient, status};
use crate::error::AppError;

/// GET|POST /api/ai-status - Probe the AI service with a fixed prompt
pub async fn check(
    Extension(client): Extension<Option<ClaudeClient>>,
) -> Result<impl IntoResponse, AppError> {
    let client = client
        .ok_or_else(|| AppError::AiUnavailable("ANTHROPIC_API_KEY not configured".to_string()))?;

    let report = status::probe(&client).await;
    let code = if report.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((code, Json(report)))
}
