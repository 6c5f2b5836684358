//! Metadata endpoint handler

use axum::Json;
use medicue_core::ServiceCapabilities;

/// GET /metadata - Return service capabilities and recognised parameters
pub async fn get() -> Json<ServiceCapabilities> {
    Json(ServiceCapabilities::new())
}
