//! Health check endpoint

use axum::{Extension, Json};
use serde::Serialize;

use crate::ai::ClaudeClient;

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    ai_configured: bool,
}

/// GET /health - Report liveness and whether AI summaries are enabled
pub async fn check(Extension(client): Extension<Option<ClaudeClient>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        ai_configured: client.is_some(),
    })
}
