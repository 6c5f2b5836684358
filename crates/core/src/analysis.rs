//! Aggregate report analysis: one pass from report text (or classified
//! findings) to the full response payload.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::alerts::{EmergencyAlert, emergency_alerts};
use crate::classify::{ClassifiedFinding, Severity, Status, classify_all};
use crate::explain::{DetailedFinding, explain};
use crate::extract::extract;
use crate::parameter::{Category, Parameter};
use crate::patient::Patient;
use crate::population::{PopulationComparison, compare};
use crate::predictions::{HealthPrediction, predict};
use crate::risk::{RiskLevel, RiskScore, score};

/// Number of simultaneous HIGH findings that counts as a multi-parameter pattern
pub const MULTIPLE_ELEVATED_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    Normal,
    AttentionNeeded,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    Normal,
    Abnormal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryAnalysis {
    pub status: CategoryStatus,
    pub findings: Vec<DetailedFinding>,
}

/// Abnormal finding formatted for display
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CriticalFinding {
    pub parameter: String,
    pub value: String,
    pub normal_range: String,
    pub status: Status,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DoctorConsultation {
    pub urgency: String,
    pub specialist: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_parameters: usize,
    pub normal_values: usize,
    pub abnormal_values: usize,
    pub high_values: usize,
    pub low_values: usize,
    pub critical_values: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub overall_status: OverallStatus,
    pub critical_findings: Vec<CriticalFinding>,
    pub detailed_analysis: BTreeMap<Category, CategoryAnalysis>,
    pub doctor_consultation: Option<DoctorConsultation>,
    pub recommendations: Vec<String>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
    pub monitoring: Vec<String>,
}

/// Cross-parameter patterns spotted in the findings
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternInsights {
    pub multiple_elevated_parameters: bool,
    pub metabolic_pattern: bool,
    pub observations: Vec<String>,
}

/// Everything produced for one report submission
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalysis {
    pub parsed_data: Vec<ClassifiedFinding>,
    pub analysis: Analysis,
    pub risk_score: RiskScore,
    pub emergency_alerts: Vec<EmergencyAlert>,
    pub population_comparison: Vec<PopulationComparison>,
    pub health_predictions: Vec<HealthPrediction>,
    pub action_plan: ActionPlan,
    pub ai_insights: PatternInsights,
    pub parameters_found: usize,
}

/// Run the whole pipeline over report text
pub fn analyze(text: &str, patient: &Patient) -> ReportAnalysis {
    build(classify_all(&extract(text)), patient)
}

/// Build the analysis from already classified findings
pub fn build(findings: Vec<ClassifiedFinding>, patient: &Patient) -> ReportAnalysis {
    let analysis = analysis(&findings);
    let risk_score = score(&findings, patient);
    let emergency_alerts = emergency_alerts(&findings);
    let population_comparison = compare(&findings, patient);
    let health_predictions = predict(&findings, patient);
    let action_plan = action_plan(&findings, &analysis, &risk_score, &emergency_alerts);
    let ai_insights = insights(&findings);

    ReportAnalysis {
        parameters_found: findings.len(),
        parsed_data: findings,
        analysis,
        risk_score,
        emergency_alerts,
        population_comparison,
        health_predictions,
        action_plan,
        ai_insights,
    }
}

/// Hard-coded conditions that make the whole report CRITICAL
fn is_critical_condition(finding: &ClassifiedFinding) -> bool {
    finding.is(Parameter::Glucose, Status::High)
        || finding.is(Parameter::Creatinine, Status::High)
        || (finding.is(Parameter::Hemoglobin, Status::Low) && finding.value < 10.0)
}

pub fn overall_status(findings: &[ClassifiedFinding]) -> OverallStatus {
    if findings.iter().any(is_critical_condition) {
        OverallStatus::Critical
    } else if findings.iter().any(ClassifiedFinding::is_abnormal) {
        OverallStatus::AttentionNeeded
    } else {
        OverallStatus::Normal
    }
}

fn analysis(findings: &[ClassifiedFinding]) -> Analysis {
    let overall_status = overall_status(findings);
    let abnormal: Vec<&ClassifiedFinding> = findings.iter().filter(|f| f.is_abnormal()).collect();
    let high_values = findings.iter().filter(|f| f.status == Status::High).count();
    let low_values = findings.iter().filter(|f| f.status == Status::Low).count();

    let mut detailed_analysis: BTreeMap<Category, CategoryAnalysis> = BTreeMap::new();
    for finding in findings {
        let entry = detailed_analysis
            .entry(finding.category)
            .or_insert_with(|| CategoryAnalysis {
                status: CategoryStatus::Normal,
                findings: Vec::new(),
            });
        entry.findings.push(explain(finding));
        if finding.is_abnormal() {
            entry.status = CategoryStatus::Abnormal;
        }
    }

    let critical_findings = abnormal
        .iter()
        .map(|f| CriticalFinding {
            parameter: f.parameter.clone(),
            value: with_unit(&f.value.to_string(), &f.unit),
            normal_range: with_unit(&f.normal_range, &f.unit),
            status: f.status,
            severity: f.severity,
        })
        .collect();

    Analysis {
        overall_status,
        critical_findings,
        detailed_analysis,
        doctor_consultation: doctor_consultation(&abnormal, overall_status),
        recommendations: recommendations(overall_status, high_values, low_values),
        summary: Summary {
            total_parameters: findings.len(),
            normal_values: findings.len() - abnormal.len(),
            abnormal_values: abnormal.len(),
            high_values,
            low_values,
            critical_values: findings
                .iter()
                .filter(|f| f.severity == Severity::Critical)
                .count(),
        },
    }
}

fn with_unit(value: &str, unit: &str) -> String {
    format!("{value} {unit}").trim_end().to_string()
}

/// Specialist routing, checked in order; the first rule with a matching
/// abnormal finding wins.
const SPECIALISTS: &[(&[Parameter], &str, &str)] = &[
    (
        &[Parameter::Glucose, Parameter::Hba1c],
        "Endocrinologist (Diabetes Specialist)",
        "Within 1-2 weeks",
    ),
    (
        &[Parameter::TotalCholesterol, Parameter::Ldl, Parameter::Hdl],
        "Cardiologist (Heart Specialist)",
        "Within 2-3 weeks",
    ),
    (
        &[Parameter::Creatinine, Parameter::Bun],
        "Nephrologist (Kidney Specialist)",
        "Within 1-2 weeks",
    ),
    (
        &[Parameter::Alt, Parameter::Ast],
        "Hepatologist / Gastroenterologist (Liver Specialist)",
        "Within 2-3 weeks",
    ),
    (
        &[Parameter::Hemoglobin, Parameter::Rbc],
        "Hematologist (Blood Specialist)",
        "Within 1-3 weeks",
    ),
];

fn doctor_consultation(
    abnormal: &[&ClassifiedFinding],
    overall_status: OverallStatus,
) -> Option<DoctorConsultation> {
    if abnormal.is_empty() {
        return None;
    }

    let (specialist, urgency) = SPECIALISTS
        .iter()
        .find(|(parameters, _, _)| {
            abnormal
                .iter()
                .any(|f| f.kind.is_some_and(|k| parameters.contains(&k)))
        })
        .map(|&(_, specialist, urgency)| (specialist, urgency))
        .unwrap_or(("General Physician", "Within 2-4 weeks"));

    let urgency = if abnormal.iter().any(|f| f.severity == Severity::Critical) {
        "URGENT - Within 24-48 hours"
    } else if overall_status == OverallStatus::Critical {
        "URGENT - Within 3-7 days"
    } else {
        urgency
    };

    Some(DoctorConsultation {
        urgency: urgency.to_string(),
        specialist: specialist.to_string(),
        reason: format!(
            "{} abnormal value(s) detected requiring medical evaluation and possible treatment",
            abnormal.len()
        ),
    })
}

fn recommendations(status: OverallStatus, high_values: usize, low_values: usize) -> Vec<String> {
    let mut lines: Vec<&str> = if status == OverallStatus::Normal {
        vec![
            "Excellent! All your test results are within normal limits",
            "Continue your current healthy lifestyle habits",
            "Schedule regular check-ups as recommended by your doctor",
            "Maintain a balanced diet and regular exercise routine",
        ]
    } else {
        vec![
            "Several test values require medical attention - please consult your healthcare provider",
            "This analysis is for informational purposes and not a substitute for professional medical advice",
            "Follow up with appropriate specialists as recommended",
            "Keep track of your symptoms and report any changes to your doctor",
        ]
    };

    if status != OverallStatus::Normal {
        if high_values > 0 {
            lines.push("Focus on lifestyle modifications to address elevated values");
        }
        if low_values > 0 {
            lines.push("Consider nutritional support for low values under medical guidance");
        }
    }

    lines.into_iter().map(String::from).collect()
}

fn category_step(category: Category) -> &'static str {
    match category {
        Category::Cbc => "Repeat the complete blood count and check iron, B12 and folate",
        Category::Lipid => "Start a heart-healthy diet low in saturated and trans fats",
        Category::Diabetes => "Track fasting blood sugar and cut back on refined carbohydrates",
        Category::Liver => "Avoid alcohol and review medications that affect the liver",
        Category::Kidney => "Stay well hydrated and avoid NSAID painkillers",
        Category::General => "Discuss the unexplained results with your doctor",
    }
}

fn action_plan(
    findings: &[ClassifiedFinding],
    analysis: &Analysis,
    risk: &RiskScore,
    alerts: &[EmergencyAlert],
) -> ActionPlan {
    let mut plan = ActionPlan::default();
    let any_abnormal = analysis.summary.abnormal_values > 0;

    for alert in alerts {
        plan.immediate.push(format!(
            "{}: {} ({})",
            alert.condition, alert.action, alert.timeframe
        ));
    }
    if let Some(consultation) = &analysis.doctor_consultation {
        plan.immediate.push(format!(
            "Book an appointment with a {} ({})",
            consultation.specialist, consultation.urgency
        ));
    }
    if plan.immediate.is_empty() {
        plan.immediate.push("No immediate action needed".to_string());
    }

    plan.short_term = analysis
        .detailed_analysis
        .iter()
        .filter(|(_, group)| group.status == CategoryStatus::Abnormal)
        .map(|(category, _)| category_step(*category).to_string())
        .collect();
    if any_abnormal {
        plan.short_term
            .push("Begin 30 minutes of moderate activity on most days".to_string());
    } else {
        plan.short_term
            .push("Keep up your current diet and activity routine".to_string());
    }

    if any_abnormal {
        plan.long_term
            .push("Repeat the abnormal tests in 3 months to confirm improvement".to_string());
    }
    if risk.level >= RiskLevel::Moderate {
        plan.long_term
            .push("Work with your doctor on a long-term risk reduction plan".to_string());
    }
    plan.long_term
        .push("Schedule a comprehensive check-up every 12 months".to_string());

    plan.monitoring = findings
        .iter()
        .filter(|f| f.is_abnormal())
        .map(|f| {
            format!(
                "Monitor {} (currently {}, normal {})",
                f.parameter,
                with_unit(&f.value.to_string(), &f.unit),
                with_unit(&f.normal_range, &f.unit)
            )
        })
        .collect();

    plan
}

fn insights(findings: &[ClassifiedFinding]) -> PatternInsights {
    let has = |parameter: Parameter, status: Status| findings.iter().any(|f| f.is(parameter, status));
    let high_count = findings.iter().filter(|f| f.status == Status::High).count();

    let multiple_elevated_parameters = high_count >= MULTIPLE_ELEVATED_THRESHOLD;
    let metabolic_pattern = has(Parameter::Glucose, Status::High)
        && has(Parameter::Triglycerides, Status::High)
        && has(Parameter::Hdl, Status::Low);

    let mut observations = Vec::new();
    if multiple_elevated_parameters {
        observations.push(format!(
            "{high_count} parameters are elevated at the same time, which points to a broader issue rather than a single isolated result"
        ));
    }
    if metabolic_pattern {
        observations.push(
            "High blood sugar, high triglycerides and low HDL together form a metabolic syndrome pattern"
                .to_string(),
        );
    }
    let low_red_cell_measures = [Parameter::Hemoglobin, Parameter::Hematocrit, Parameter::Rbc]
        .into_iter()
        .filter(|p| has(*p, Status::Low))
        .count();
    if low_red_cell_measures >= 2 {
        observations.push(
            "Several red blood cell measures are low together, which is consistent with anemia"
                .to_string(),
        );
    }
    if has(Parameter::Creatinine, Status::High) && has(Parameter::Bun, Status::High) {
        observations.push(
            "Creatinine and BUN are both elevated, which strengthens the signal of reduced kidney function"
                .to_string(),
        );
    }
    if has(Parameter::Alt, Status::High) && has(Parameter::Ast, Status::High) {
        observations.push("Both liver enzymes (ALT and AST) are elevated".to_string());
    }
    if !findings.is_empty() && findings.iter().all(|f| !f.is_abnormal()) {
        observations.push("All measured values are within their reference ranges".to_string());
    }

    PatternInsights {
        multiple_elevated_parameters,
        metabolic_pattern,
        observations,
    }
}
