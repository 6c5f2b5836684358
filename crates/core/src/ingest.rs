//! Turning uploaded bytes or submitted text into report text.
//!
//! Only plain-text uploads are read. PDFs and images are stood in for by a
//! rotating [`SampleReport`] until real extraction is wired in.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ReportError;
use crate::samples::SampleReport;

/// Shortest text worth analysing, in characters
pub const MIN_TEXT_CHARS: usize = 10;

/// Characters echoed back as `extractedText`
pub const PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    Uploaded,
    Submitted,
    Sample,
}

#[derive(Debug, Clone)]
pub struct ReportText {
    pub text: String,
    pub source: TextSource,
}

/// Upload metadata needed to pick a reading strategy
#[derive(Debug, Clone, Default)]
pub struct Upload<'a> {
    pub bytes: &'a [u8],
    pub content_type: Option<&'a str>,
    pub file_name: Option<&'a str>,
}

/// True for `text/*` content types or a `.txt` file name
pub fn is_plain_text(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let by_type = content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("text/plain"))
        .unwrap_or(false);
    let by_name = file_name
        .map(|name| name.to_ascii_lowercase().ends_with(".txt"))
        .unwrap_or(false);
    by_type || by_name
}

impl ReportText {
    /// Read an uploaded file. Non-text formats are replaced by the report
    /// `sample` picks; it is only called for those.
    pub fn from_upload(
        upload: &Upload<'_>,
        sample: impl FnOnce() -> SampleReport,
        today: NaiveDate,
    ) -> Result<Self, ReportError> {
        if is_plain_text(upload.content_type, upload.file_name) {
            let text = String::from_utf8_lossy(upload.bytes).into_owned();
            return Self::validated(text, TextSource::Uploaded);
        }

        Self::validated(sample().render(today), TextSource::Sample)
    }

    /// Accept text submitted directly in a request body
    pub fn from_submitted(text: String) -> Result<Self, ReportError> {
        Self::validated(text, TextSource::Submitted)
    }

    fn validated(text: String, source: TextSource) -> Result<Self, ReportError> {
        if text.chars().count() < MIN_TEXT_CHARS {
            return Err(ReportError::TooShort);
        }
        Ok(Self { text, source })
    }

    /// First `PREVIEW_CHARS` characters, cut on a char boundary
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_CHARS).collect()
    }
}
