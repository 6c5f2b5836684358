//! Emergency alerts for crisis-level values.
//!
//! These thresholds are stricter than the critical limits in the parameter
//! dictionary and are evaluated independently of the risk score.

use serde::Serialize;

use crate::classify::{ClassifiedFinding, Severity};
use crate::parameter::Parameter;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Direction {
    Above,
    Below,
}

struct CrisisRule {
    parameter: Parameter,
    direction: Direction,
    threshold: f64,
    condition: &'static str,
    message: &'static str,
    action: &'static str,
    timeframe: &'static str,
    symptoms: &'static [&'static str],
}

impl CrisisRule {
    fn triggered_by(&self, value: f64) -> bool {
        match self.direction {
            Direction::Above => value > self.threshold,
            Direction::Below => value < self.threshold,
        }
    }
}

const CRISIS_RULES: &[CrisisRule] = &[
    CrisisRule {
        parameter: Parameter::Glucose,
        direction: Direction::Above,
        threshold: 400.0,
        condition: "Severe Hyperglycemia",
        message: "Blood sugar is dangerously high and may lead to diabetic ketoacidosis or a hyperosmolar state",
        action: "Go to the emergency room or call emergency services",
        timeframe: "Immediately",
        symptoms: &[
            "Extreme thirst",
            "Frequent urination",
            "Confusion",
            "Fruity-smelling breath",
            "Nausea or vomiting",
        ],
    },
    CrisisRule {
        parameter: Parameter::Hemoglobin,
        direction: Direction::Below,
        threshold: 7.0,
        condition: "Severe Anemia",
        message: "Hemoglobin is low enough that organs may not receive adequate oxygen",
        action: "Seek emergency medical evaluation; a transfusion may be required",
        timeframe: "Within 24 hours",
        symptoms: &[
            "Shortness of breath at rest",
            "Chest pain",
            "Rapid heartbeat",
            "Fainting or severe dizziness",
        ],
    },
    CrisisRule {
        parameter: Parameter::Creatinine,
        direction: Direction::Above,
        threshold: 4.0,
        condition: "Acute Kidney Injury",
        message: "Creatinine indicates severely reduced kidney function",
        action: "Contact a nephrologist or go to the emergency room",
        timeframe: "Within 24 hours",
        symptoms: &[
            "Reduced urine output",
            "Swelling in legs or ankles",
            "Shortness of breath",
            "Confusion",
        ],
    },
    CrisisRule {
        parameter: Parameter::Platelets,
        direction: Direction::Below,
        threshold: 50.0,
        condition: "Severe Thrombocytopenia",
        message: "Platelet count is low enough to cause serious bleeding",
        action: "Seek urgent medical care and avoid injury or blood-thinning medication",
        timeframe: "Within 24 hours",
        symptoms: &[
            "Unusual bruising",
            "Nosebleeds or bleeding gums",
            "Blood in urine or stool",
            "Pinpoint red spots on the skin",
        ],
    },
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub condition: String,
    pub parameter: String,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
    pub message: String,
    pub action: String,
    pub timeframe: String,
    pub symptoms: Vec<String>,
}

/// Scan findings for crisis-level values
pub fn emergency_alerts(findings: &[ClassifiedFinding]) -> Vec<EmergencyAlert> {
    CRISIS_RULES
        .iter()
        .filter_map(|rule| {
            let finding = findings
                .iter()
                .find(|f| f.kind == Some(rule.parameter) && rule.triggered_by(f.value))?;
            Some(EmergencyAlert {
                condition: rule.condition.to_string(),
                parameter: finding.parameter.clone(),
                value: finding.value,
                threshold: rule.threshold,
                severity: Severity::Critical,
                message: rule.message.to_string(),
                action: rule.action.to_string(),
                timeframe: rule.timeframe.to_string(),
                symptoms: rule.symptoms.iter().map(|s| s.to_string()).collect(),
            })
        })
        .collect()
}
