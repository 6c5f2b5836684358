//! API key authentication middleware

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use medicue_core::{ErrorCode, ErrorOutcome};

/// Header carrying the client's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API Key authentication state
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Without a configured key every request is allowed
    pub fn verify(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.api_key else {
            return true;
        };

        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|provided| provided == expected)
    }
}

/// Reject requests without a valid `X-API-Key` header
pub async fn auth_middleware(request: Request<Body>, next: Next) -> Response {
    let auth = request.extensions().get::<ApiKeyAuth>().cloned();

    if let Some(auth) = auth {
        if !auth.verify(request.headers()) {
            tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
            let outcome = ErrorOutcome::new(ErrorCode::Unauthorized, "Invalid or missing API key");
            return (StatusCode::UNAUTHORIZED, Json(outcome)).into_response();
        }
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_verify() {
        let auth = ApiKeyAuth::new(Some("secret".to_string()));
        let mut headers = HeaderMap::new();
        assert!(!auth.verify(&headers));

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("wrong"));
        assert!(!auth.verify(&headers));

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("secret"));
        assert!(auth.verify(&headers));

        assert!(ApiKeyAuth::new(None).verify(&HeaderMap::new()));
    }
}
