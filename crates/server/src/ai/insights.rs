//! Plain-language report summary written by Claude, with a rule-based fallback

use medicue_core::{ReportAnalysis, narrative};
use serde::Serialize;

use super::client::{AiError, ClaudeClient};

const SYSTEM_PROMPT: &str = "You explain blood test results to patients in plain, calm language. \
Write one short paragraph of at most 150 words. Mention the most important abnormal values, \
what they usually indicate, and which kind of doctor to see. Do not diagnose, do not \
prescribe medication, and remind the reader that a doctor should review the results.";

const MAX_TOKENS: u32 = 400;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Model,
    Rules,
}

#[derive(Debug, Clone, Serialize)]
pub struct AiSummary {
    pub source: SummarySource,
    pub text: String,
}

/// Build the user prompt from the structured analysis
pub fn build_prompt(report: &ReportAnalysis) -> String {
    let mut prompt = format!(
        "Overall status: {:?}. Risk score: {} ({}).\nLab values:\n",
        report.analysis.overall_status, report.risk_score.score, report.risk_score.message
    );

    for finding in &report.parsed_data {
        prompt.push_str(&format!(
            "- {}: {} {} (normal {}, {})\n",
            finding.parameter,
            finding.value,
            finding.unit,
            finding.normal_range,
            finding.status.as_str()
        ));
    }

    for alert in &report.emergency_alerts {
        prompt.push_str(&format!("Emergency: {}\n", alert.condition));
    }

    if let Some(consultation) = &report.analysis.doctor_consultation {
        prompt.push_str(&format!(
            "Suggested specialist: {} ({})\n",
            consultation.specialist, consultation.urgency
        ));
    }

    prompt
}

async fn model_summary(client: &ClaudeClient, report: &ReportAnalysis) -> Result<String, AiError> {
    let text = client
        .message(Some(SYSTEM_PROMPT), &build_prompt(report), MAX_TOKENS)
        .await?;
    Ok(text.trim().to_string())
}

/// Summarise the report with the model when one is configured.
///
/// Never fails: model errors and timeouts fall back to the rule-based summary.
pub async fn summarize(client: Option<&ClaudeClient>, report: &ReportAnalysis) -> AiSummary {
    let rules = || AiSummary {
        source: SummarySource::Rules,
        text: narrative::summarize(report),
    };

    let Some(client) = client else {
        return rules();
    };

    if report.parameters_found == 0 {
        return rules();
    }

    match model_summary(client, report).await {
        Ok(text) if !text.is_empty() => AiSummary {
            source: SummarySource::Model,
            text,
        },
        Ok(_) => {
            tracing::warn!("AI summary was empty, using rule-based summary");
            metrics::counter!("ai_summary_fallbacks_total", "reason" => "empty").increment(1);
            rules()
        }
        Err(e) => {
            tracing::warn!(error = %e, "AI summary failed, using rule-based summary");
            let reason = match e {
                AiError::Timeout(_) => "timeout",
                _ => "error",
            };
            metrics::counter!("ai_summary_fallbacks_total", "reason" => reason).increment(1);
            rules()
        }
    }
}
