//! Connectivity probe for the AI service

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::client::{AiError, ClaudeClient};

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(15);
const PROBE_PROMPT: &str = "Respond with exactly: 'AI service is working correctly!'";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    ApiKeyInvalid,
    QuotaOrBilling,
    Permissions,
    Network,
    ModelError,
    Unknown,
}

impl ErrorType {
    pub fn suggestion(&self) -> &'static str {
        match self {
            ErrorType::ApiKeyInvalid => "Check ANTHROPIC_API_KEY in the Anthropic console",
            ErrorType::QuotaOrBilling => "Check the account's credit balance and rate limits",
            ErrorType::Permissions => "Check that the API key is allowed to use this model",
            ErrorType::Network => "Check internet connectivity and firewall settings",
            ErrorType::ModelError => "Check that AI_MODEL names an available model",
            ErrorType::Unknown => "Check the server logs for details",
        }
    }
}

/// Map a client error onto the coarse categories reported to operators
pub fn classify(err: &AiError) -> ErrorType {
    match err {
        AiError::Http(_) | AiError::Timeout(_) => ErrorType::Network,
        AiError::EmptyResponse => ErrorType::Unknown,
        AiError::Api { status, message } => {
            let message = message.to_lowercase();
            match status {
                401 => ErrorType::ApiKeyInvalid,
                403 => ErrorType::Permissions,
                402 | 429 => ErrorType::QuotaOrBilling,
                404 => ErrorType::ModelError,
                _ if message.contains("api key") || message.contains("x-api-key") => {
                    ErrorType::ApiKeyInvalid
                }
                _ if message.contains("credit")
                    || message.contains("quota")
                    || message.contains("billing") =>
                {
                    ErrorType::QuotaOrBilling
                }
                _ if message.contains("permission") => ErrorType::Permissions,
                _ if message.contains("model") => ErrorType::ModelError,
                _ => ErrorType::Unknown,
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStatus {
    pub success: bool,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Send a fixed prompt and report whether the service answered
pub async fn probe(client: &ClaudeClient) -> AiStatus {
    let client = client.with_timeout(PROBE_TIMEOUT);
    let result = client.message(None, PROBE_PROMPT, 100).await;

    match result {
        Ok(text) => AiStatus {
            success: true,
            model: client.model().to_string(),
            response: Some(text),
            error: None,
            error_type: None,
            suggestion: None,
            timestamp: Utc::now(),
        },
        Err(e) => {
            let error_type = classify(&e);
            tracing::warn!(error = %e, error_type = ?error_type, "AI status probe failed");
            AiStatus {
                success: false,
                model: client.model().to_string(),
                response: None,
                error: Some(e.to_string()),
                error_type: Some(error_type),
                suggestion: Some(error_type.suggestion().to_string()),
                timestamp: Utc::now(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, message: &str) -> AiError {
        AiError::Api {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_classify_by_status() {
        assert_eq!(classify(&api(401, "invalid x-api-key")), ErrorType::ApiKeyInvalid);
        assert_eq!(classify(&api(403, "forbidden")), ErrorType::Permissions);
        assert_eq!(classify(&api(429, "rate limited")), ErrorType::QuotaOrBilling);
        assert_eq!(classify(&api(404, "model: nope")), ErrorType::ModelError);
    }

    #[test]
    fn test_classify_by_message() {
        assert_eq!(
            classify(&api(400, "Your credit balance is too low")),
            ErrorType::QuotaOrBilling
        );
        assert_eq!(classify(&api(400, "unknown model name")), ErrorType::ModelError);
        assert_eq!(classify(&api(500, "overloaded")), ErrorType::Unknown);
    }

    #[test]
    fn test_timeout_is_network() {
        let err = AiError::Timeout(PROBE_TIMEOUT);
        assert_eq!(classify(&err), ErrorType::Network);
        assert_eq!(
            serde_json::to_value(classify(&err)).unwrap(),
            serde_json::json!("network")
        );
    }
}
