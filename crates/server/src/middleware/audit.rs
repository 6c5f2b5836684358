//! Audit logging middleware for report submissions

use axum::{body::Body, extract::Request, http::Method, middleware::Next, response::Response};

use super::auth::API_KEY_HEADER;
use super::request_id::RequestId;

/// Middleware to log every POST (report uploads and analyses) for audit purposes
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().path().to_string();
    let authenticated = request.headers().contains_key(API_KEY_HEADER);
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    // Run the request first to get the response status
    let response = next.run(request).await;

    if method == Method::POST {
        let status = response.status().as_u16();

        tracing::info!(
            target: "audit",
            request_id = %request_id,
            path = %uri,
            status = %status,
            authenticated,
            "Report submission"
        );
    }

    response
}
