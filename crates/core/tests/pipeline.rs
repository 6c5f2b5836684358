//! End-to-end scenarios over the public pipeline API

use medicue_core::analysis::MULTIPLE_ELEVATED_THRESHOLD;
use medicue_core::{
    Category, Gender, OverallStatus, Patient, ReportText, SampleReport, Severity, Status, analyze,
    narrative,
};

fn patient() -> Patient {
    Patient::default()
}

#[test]
fn test_low_hemoglobin_is_moderate() {
    let report = analyze("Hemoglobin: 9.5 g/dL", &patient());

    assert_eq!(report.parameters_found, 1);
    let finding = &report.parsed_data[0];
    assert_eq!(finding.parameter, "Hemoglobin");
    assert_eq!(finding.value, 9.5);
    assert_eq!(finding.status, Status::Low);
    assert_eq!(finding.severity, Severity::Moderate);
    assert_eq!(finding.category, Category::Cbc);

    let consultation = report.analysis.doctor_consultation.as_ref().unwrap();
    assert!(consultation.specialist.starts_with("Hematologist"));
}

#[test]
fn test_very_high_glucose_is_critical_with_alert() {
    let report = analyze("Glucose: 450 mg/dL", &patient());

    let finding = &report.parsed_data[0];
    assert_eq!(finding.status, Status::High);
    assert_eq!(finding.severity, Severity::Critical);
    assert_eq!(report.analysis.overall_status, OverallStatus::Critical);
    assert_eq!(report.analysis.summary.critical_values, 1);

    assert_eq!(report.emergency_alerts.len(), 1);
    assert_eq!(report.emergency_alerts[0].parameter, "Glucose");

    let consultation = report.analysis.doctor_consultation.as_ref().unwrap();
    assert_eq!(consultation.urgency, "URGENT - Within 24-48 hours");
}

#[test]
fn test_healthy_lipid_panel() {
    let text = "LIPID PROFILE\nTotal Cholesterol: 180 mg/dL\nLDL: 90 mg/dL\nHDL: 55 mg/dL\nTriglycerides: 120 mg/dL";
    let report = analyze(text, &patient());

    assert_eq!(report.parameters_found, 4);
    assert_eq!(report.analysis.overall_status, OverallStatus::Normal);
    assert!(report.analysis.doctor_consultation.is_none());
    assert!(report.risk_score.risk_factors.is_empty());
    assert_eq!(report.risk_score.score, 0);
    assert!(
        report
            .risk_score
            .protective_factors
            .iter()
            .all(|f| f.parameter != "Hdl")
    );
}

#[test]
fn test_healthy_lipid_panel_credits_optimal_ldl() {
    let text = "Total Cholesterol: 185 mg/dL\nLDL: 95 mg/dL\nHDL: 55 mg/dL";
    let report = analyze(text, &patient());

    assert_eq!(report.analysis.overall_status, OverallStatus::Normal);
    assert!(report.risk_score.risk_factors.is_empty());

    let protective = &report.risk_score.protective_factors;
    assert_eq!(protective.len(), 1);
    assert_eq!(protective[0].parameter, "Ldl");
    assert!(protective[0].description.starts_with("Optimal LDL cholesterol"));
    assert_eq!(report.risk_score.life_expectancy_impact, 1.0);
}

#[test]
fn test_hdl_protective_only_above_sixty() {
    let at = analyze("HDL: 60 mg/dL", &patient());
    assert!(at.risk_score.protective_factors.is_empty());

    let above = analyze("HDL: 61 mg/dL", &patient());
    assert_eq!(above.risk_score.protective_factors.len(), 1);
    assert_eq!(above.risk_score.protective_factors[0].parameter, "Hdl");
}

#[test]
fn test_empty_text() {
    let report = analyze("", &patient());
    assert!(report.parsed_data.is_empty());
    assert_eq!(report.analysis.overall_status, OverallStatus::Normal);
    assert!(report.analysis.doctor_consultation.is_none());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["parsedData"], serde_json::json!([]));
    assert!(json["analysis"]["doctorConsultation"].is_null());
}

#[test]
fn test_analysis_is_idempotent() {
    let text = SampleReport::Abnormal.render(chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    let p = Patient::new(58, Gender::Female);

    let first = serde_json::to_value(analyze(&text, &p)).unwrap();
    let second = serde_json::to_value(analyze(&text, &p)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_multiple_elevated_boundary() {
    assert_eq!(MULTIPLE_ELEVATED_THRESHOLD, 3);

    let two = analyze("LDL: 165 mg/dL\nTriglycerides: 220 mg/dL", &patient());
    assert!(!two.ai_insights.multiple_elevated_parameters);

    let three = analyze(
        "LDL: 165 mg/dL\nTriglycerides: 220 mg/dL\nGlucose: 110 mg/dL",
        &patient(),
    );
    assert!(three.ai_insights.multiple_elevated_parameters);
}

#[test]
fn test_submitted_text_through_pipeline() {
    let report_text = ReportText::from_submitted("Creatinine: 1.5 mg/dL\nBUN: 28 mg/dL".to_string()).unwrap();
    let report = analyze(&report_text.text, &patient());

    assert_eq!(report.analysis.overall_status, OverallStatus::Critical);
    assert!(report.analysis.detailed_analysis.contains_key(&Category::Kidney));
    assert!(narrative::summarize(&report).contains("Nephrologist"));
}

#[test]
fn test_json_keys_are_camel_case() {
    let report = analyze("Glucose: 88 mg/dL", &patient());
    let json = serde_json::to_value(&report).unwrap();

    assert!(json["riskScore"]["lifeExpectancyImpact"].is_number());
    assert_eq!(json["parsedData"][0]["normalRange"], "70-100");
    assert_eq!(json["parsedData"][0]["status"], "NORMAL");
    assert!(json["analysis"]["detailedAnalysis"]["Diabetes"].is_object());
    assert_eq!(json["parametersFound"], 1);
}
