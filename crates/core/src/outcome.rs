use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable failure code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoFile,
    NoTextExtracted,
    ExtractionError,
    InvalidRequest,
    Unauthorized,
    RateLimited,
    AiUnavailable,
    InternalError,
}

/// Error body returned for any failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutcome {
    pub success: bool,
    pub error: String,
    pub code: ErrorCode,
    pub timestamp: DateTime<Utc>,
}

impl ErrorOutcome {
    pub fn new(code: ErrorCode, message: &str) -> Self {
        Self {
            success: false,
            error: message.to_string(),
            code,
            timestamp: Utc::now(),
        }
    }

    pub fn invalid(message: &str) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }
}
