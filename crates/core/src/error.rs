use crate::outcome::ErrorCode;
use thiserror::Error;

/// Report ingestion errors
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Failed to extract text: {0}")]
    Unreadable(String),

    #[error("Could not extract readable text from file.")]
    TooShort,
}

impl ReportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReportError::MissingFile => ErrorCode::NoFile,
            ReportError::Unreadable(_) => ErrorCode::ExtractionError,
            ReportError::TooShort => ErrorCode::NoTextExtracted,
        }
    }
}
