//! Rule-based health outlooks derived from abnormal findings

use serde::Serialize;

use crate::classify::{ClassifiedFinding, Severity, Status};
use crate::parameter::Parameter;
use crate::patient::Patient;

const MAX_PROBABILITY: u32 = 95;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthPrediction {
    pub condition: String,
    pub probability: u32,
    pub timeframe: String,
    pub severity: Severity,
    pub preventable: bool,
    pub prevention: Vec<String>,
}

struct Outlook {
    condition: &'static str,
    probability: u32,
    timeframe: &'static str,
    severity: Severity,
    prevention: &'static [&'static str],
}

fn find(findings: &[ClassifiedFinding], parameter: Parameter) -> Option<&ClassifiedFinding> {
    findings.iter().find(|f| f.kind == Some(parameter))
}

fn has(findings: &[ClassifiedFinding], parameter: Parameter, status: Status) -> bool {
    findings.iter().any(|f| f.is(parameter, status))
}

fn diabetes(findings: &[ClassifiedFinding]) -> Option<Outlook> {
    let glucose = find(findings, Parameter::Glucose).map(|f| f.value);
    let hba1c = find(findings, Parameter::Hba1c).map(|f| f.value);

    let diabetic_range =
        glucose.is_some_and(|g| g >= 126.0) || hba1c.is_some_and(|a| a >= 6.5);
    let elevated = glucose.is_some_and(|g| g > 100.0) || hba1c.is_some_and(|a| a > 5.7);

    let (probability, severity) = if diabetic_range {
        (85, Severity::Critical)
    } else if elevated {
        (45, Severity::Moderate)
    } else {
        return None;
    };

    Some(Outlook {
        condition: "Type 2 Diabetes",
        probability,
        timeframe: "Next 5 years",
        severity,
        prevention: &[
            "Lose 5-7% of body weight if overweight",
            "Exercise at least 150 minutes per week",
            "Limit refined carbohydrates and sugary drinks",
        ],
    })
}

fn cardiovascular(findings: &[ClassifiedFinding]) -> Option<Outlook> {
    let signals = [
        has(findings, Parameter::TotalCholesterol, Status::High),
        has(findings, Parameter::Ldl, Status::High),
        has(findings, Parameter::Hdl, Status::Low),
        has(findings, Parameter::Triglycerides, Status::High),
    ]
    .into_iter()
    .filter(|s| *s)
    .count();

    let (probability, severity) = match signals {
        0 => return None,
        1 => (25, Severity::Moderate),
        2 => (45, Severity::Moderate),
        _ => (70, Severity::Critical),
    };

    Some(Outlook {
        condition: "Cardiovascular Disease",
        probability,
        timeframe: "Next 10 years",
        severity,
        prevention: &[
            "Adopt a Mediterranean-style diet",
            "Do aerobic exercise most days",
            "Avoid smoking",
            "Keep blood pressure under control",
        ],
    })
}

fn kidney(findings: &[ClassifiedFinding]) -> Option<Outlook> {
    let creatinine = find(findings, Parameter::Creatinine).filter(|f| f.status == Status::High);
    let bun_high = has(findings, Parameter::Bun, Status::High);

    let (probability, severity) = match creatinine {
        Some(f) if f.value > 2.0 => (60, Severity::Critical),
        Some(_) => (30, Severity::Moderate),
        None if bun_high => (30, Severity::Moderate),
        None => return None,
    };

    Some(Outlook {
        condition: "Chronic Kidney Disease",
        probability,
        timeframe: "Next 5-10 years",
        severity,
        prevention: &[
            "Stay well hydrated",
            "Avoid regular use of NSAID painkillers",
            "Control blood pressure and blood sugar",
        ],
    })
}

fn fatty_liver(findings: &[ClassifiedFinding]) -> Option<Outlook> {
    let enzymes_high =
        has(findings, Parameter::Alt, Status::High) || has(findings, Parameter::Ast, Status::High);
    if !enzymes_high {
        return None;
    }

    let probability = if has(findings, Parameter::Triglycerides, Status::High) {
        55
    } else {
        35
    };

    Some(Outlook {
        condition: "Fatty Liver Disease",
        probability,
        timeframe: "Next 5 years",
        severity: Severity::Moderate,
        prevention: &[
            "Avoid alcohol",
            "Reduce sugar and processed food",
            "Reach and keep a healthy weight",
        ],
    })
}

fn anemia(findings: &[ClassifiedFinding]) -> Option<Outlook> {
    if !has(findings, Parameter::Hemoglobin, Status::Low) {
        return None;
    }

    Some(Outlook {
        condition: "Progressive Anemia",
        probability: 50,
        timeframe: "Next 6-12 months",
        severity: Severity::Moderate,
        prevention: &[
            "Eat iron-rich foods with vitamin C",
            "Investigate sources of blood loss with your doctor",
            "Check B12 and folate levels",
        ],
    })
}

/// Predict conditions that the current findings point towards.
///
/// Patients over 65 get +10 on every probability, capped at 95.
pub fn predict(findings: &[ClassifiedFinding], patient: &Patient) -> Vec<HealthPrediction> {
    let age_bonus = if patient.age > 65 { 10 } else { 0 };

    [
        diabetes(findings),
        cardiovascular(findings),
        kidney(findings),
        fatty_liver(findings),
        anemia(findings),
    ]
    .into_iter()
    .flatten()
    .map(|outlook| HealthPrediction {
        condition: outlook.condition.to_string(),
        probability: (outlook.probability + age_bonus).min(MAX_PROBABILITY),
        timeframe: outlook.timeframe.to_string(),
        severity: outlook.severity,
        preventable: true,
        prevention: outlook.prevention.iter().map(|s| s.to_string()).collect(),
    })
    .collect()
}
