//! Rule-based plain-language summary of a report analysis.
//!
//! Used as the summary text whenever the generative model is not configured,
//! fails, or times out.

use crate::analysis::{OverallStatus, ReportAnalysis};

pub fn summarize(report: &ReportAnalysis) -> String {
    if report.parameters_found == 0 {
        return "No recognizable lab values were found in this report. Check that the file contains test names followed by their values.".to_string();
    }

    let summary = &report.analysis.summary;
    let mut sentences = Vec::new();

    sentences.push(match report.analysis.overall_status {
        OverallStatus::Normal => format!(
            "All {} measured values are within their normal ranges.",
            summary.total_parameters
        ),
        OverallStatus::AttentionNeeded => format!(
            "{} of {} measured values are outside their normal ranges and need attention.",
            summary.abnormal_values, summary.total_parameters
        ),
        OverallStatus::Critical => format!(
            "{} of {} measured values are outside their normal ranges, including results that need prompt medical review.",
            summary.abnormal_values, summary.total_parameters
        ),
    });

    if !report.emergency_alerts.is_empty() {
        let conditions: Vec<&str> = report
            .emergency_alerts
            .iter()
            .map(|a| a.condition.as_str())
            .collect();
        sentences.push(format!(
            "Emergency warning: {}. Seek medical care now.",
            conditions.join(", ")
        ));
    }

    let risk = &report.risk_score;
    sentences.push(format!(
        "Your overall risk score is {} ({}), better than {}% of people.",
        risk.score,
        risk.message.to_lowercase(),
        risk.percentile
    ));

    if let Some(consultation) = &report.analysis.doctor_consultation {
        sentences.push(format!(
            "Recommended next step: see a {} ({}).",
            consultation.specialist, consultation.urgency
        ));
    }

    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::patient::Patient;

    #[test]
    fn test_empty_summary() {
        let report = analyze("", &Patient::default());
        assert!(summarize(&report).starts_with("No recognizable lab values"));
    }

    #[test]
    fn test_critical_summary_mentions_alert_and_specialist() {
        let report = analyze("Glucose: 450 mg/dL", &Patient::default());
        let text = summarize(&report);
        assert!(text.contains("1 of 1 measured values"));
        assert!(text.contains("Emergency warning: Severe Hyperglycemia"));
        assert!(text.contains("Endocrinologist"));
    }

    #[test]
    fn test_normal_summary() {
        let report = analyze("Glucose: 88 mg/dL\nHDL: 55 mg/dL", &Patient::default());
        let text = summarize(&report);
        assert!(text.starts_with("All 2 measured values are within their normal ranges."));
        assert!(!text.contains("Recommended next step"));
    }
}
