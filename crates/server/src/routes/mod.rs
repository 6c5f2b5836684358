pub mod ai_status;
pub mod health;
pub mod metadata;
pub mod metrics;
pub mod reports;

use axum::{
    Router,
    routing::{get, post},
};

/// Build report analysis routes
pub fn api_routes() -> Router {
    Router::new()
        .route("/upload-report", post(reports::upload))
        .route("/analyze", post(reports::analyze_text))
        .route("/ai-status", get(ai_status::check).post(ai_status::check))
}
