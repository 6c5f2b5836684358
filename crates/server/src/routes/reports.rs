//! Report upload and analysis endpoints

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Multipart, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use medicue_core::{
    Patient, ReportAnalysis, ReportError, ReportText, SampleReport, TextSource, Upload, analyze,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::ai::{ClaudeClient, insights};
use crate::error::AppError;

/// Hands out demo reports in turn for uploads that are not plain text
#[derive(Clone, Default)]
pub struct SampleRotation(Arc<AtomicUsize>);

impl SampleRotation {
    pub fn next(&self) -> SampleReport {
        SampleReport::nth(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// Request body for direct text analysis
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    text: String,
    age: Option<JsonValue>,
    gender: Option<String>,
}

/// Successful analysis response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    success: bool,
    extracted_text: String,
    text_source: TextSource,
    #[serde(flatten)]
    report: ReportAnalysis,
    ai_summary: insights::AiSummary,
    timestamp: DateTime<Utc>,
}

struct UploadedFile {
    bytes: Bytes,
    content_type: Option<String>,
    file_name: Option<String>,
}

/// POST /api/upload-report - Analyse an uploaded lab report file
///
/// Multipart fields: `file` (required), `age`, `gender`.
pub async fn upload(
    Extension(client): Extension<Option<ClaudeClient>>,
    Extension(rotation): Extension<SampleRotation>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let mut file = None;
    let mut age = None;
    let mut gender = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ReportError::Unreadable(e.body_text()))?;
                file = Some(UploadedFile {
                    bytes,
                    content_type,
                    file_name,
                });
            }
            Some("age") => age = Some(field.text().await?),
            Some("gender") => gender = Some(field.text().await?),
            _ => {}
        }
    }

    let file = file.ok_or(ReportError::MissingFile)?;
    tracing::info!(
        file_name = file.file_name.as_deref().unwrap_or("-"),
        content_type = file.content_type.as_deref().unwrap_or("-"),
        size = file.bytes.len(),
        "Report uploaded"
    );

    let upload = Upload {
        bytes: &file.bytes,
        content_type: file.content_type.as_deref(),
        file_name: file.file_name.as_deref(),
    };
    let report_text =
        ReportText::from_upload(&upload, || rotation.next(), Utc::now().date_naive())?;
    let patient = Patient::from_raw(age.as_deref(), gender.as_deref());

    Ok(Json(respond(report_text, patient, client.as_ref()).await))
}

/// POST /api/analyze - Analyse report text submitted as JSON
pub async fn analyze_text(
    Extension(client): Extension<Option<ClaudeClient>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let Json(body) = body?;

    let age = body.age.as_ref().and_then(|age| match age {
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::String(s) => Some(s.clone()),
        _ => None,
    });
    let patient = Patient::from_raw(age.as_deref(), body.gender.as_deref());
    let report_text = ReportText::from_submitted(body.text)?;

    Ok(Json(respond(report_text, patient, client.as_ref()).await))
}

async fn respond(
    report_text: ReportText,
    patient: Patient,
    client: Option<&ClaudeClient>,
) -> AnalysisResponse {
    let report = analyze(&report_text.text, &patient);

    tracing::info!(
        source = ?report_text.source,
        parameters_found = report.parameters_found,
        overall_status = ?report.analysis.overall_status,
        risk_score = report.risk_score.score,
        "Report analyzed"
    );
    metrics::counter!(
        "reports_analyzed_total",
        "status" => format!("{:?}", report.analysis.overall_status)
    )
    .increment(1);

    let ai_summary = insights::summarize(client, &report).await;

    AnalysisResponse {
        success: true,
        extracted_text: report_text.preview(),
        text_source: report_text.source,
        report,
        ai_summary,
        timestamp: Utc::now(),
    }
}
