//! Status and severity classification of extracted values

use serde::{Deserialize, Serialize};

use crate::extract::ExtractedValue;
use crate::parameter::{Category, Parameter};

/// Position of a value relative to its reference range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Normal,
    Low,
    High,
}

impl Status {
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Status::Normal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "NORMAL",
            Status::Low => "LOW",
            Status::High => "HIGH",
        }
    }
}

/// Clinical urgency shared by the classifier, risk scorer, alerts and
/// predictions. Ordered from least to most urgent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Normal,
    Moderate,
    Critical,
}

/// An extracted value annotated against its reference data
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedFinding {
    pub parameter: String,
    #[serde(skip)]
    pub kind: Option<Parameter>,
    pub value: f64,
    pub unit: String,
    pub status: Status,
    pub severity: Severity,
    pub normal_range: String,
    pub category: Category,
}

impl ClassifiedFinding {
    pub fn is_abnormal(&self) -> bool {
        self.status.is_abnormal()
    }

    /// True when this finding is the given parameter with the given status
    pub fn is(&self, parameter: Parameter, status: Status) -> bool {
        self.kind == Some(parameter) && self.status == status
    }
}

/// Classify a value of a known parameter
pub fn classify_value(parameter: Parameter, value: f64) -> ClassifiedFinding {
    let spec = parameter.spec();

    let status = if value < spec.min {
        Status::Low
    } else if value > spec.max {
        Status::High
    } else {
        Status::Normal
    };

    let severity = if spec.critical.crossed_by(value) {
        Severity::Critical
    } else if status.is_abnormal() {
        Severity::Moderate
    } else {
        Severity::Normal
    };

    ClassifiedFinding {
        parameter: parameter.display_name().to_string(),
        kind: Some(parameter),
        value,
        unit: spec.unit.to_string(),
        status,
        severity,
        normal_range: spec.normal_range(),
        category: spec.category,
    }
}

pub fn classify(extracted: &ExtractedValue) -> ClassifiedFinding {
    classify_value(extracted.parameter, extracted.raw_value)
}

/// Classify a value by parameter name.
///
/// Names outside the dictionary have no reference range, so they land in
/// `General` as NORMAL.
pub fn classify_named(name: &str, value: f64) -> ClassifiedFinding {
    match Parameter::from_name(name) {
        Some(parameter) => classify_value(parameter, value),
        None => ClassifiedFinding {
            parameter: name.trim().to_string(),
            kind: None,
            value,
            unit: String::new(),
            status: Status::Normal,
            severity: Severity::Normal,
            normal_range: "N/A".to_string(),
            category: Category::General,
        },
    }
}

pub fn classify_all(values: &[ExtractedValue]) -> Vec<ClassifiedFinding> {
    values.iter().map(classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries_for_every_parameter() {
        for p in Parameter::ALL {
            let spec = p.spec();
            assert_eq!(classify_value(p, spec.max).status, Status::Normal, "{}", spec.name);
            assert_eq!(classify_value(p, spec.max + 0.1).status, Status::High, "{}", spec.name);
            if spec.min > 0.0 {
                assert_eq!(classify_value(p, spec.min).status, Status::Normal, "{}", spec.name);
                assert_eq!(
                    classify_value(p, spec.min - 0.01).status,
                    Status::Low,
                    "{}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_low_hemoglobin_above_critical_is_moderate() {
        let finding = classify_value(Parameter::Hemoglobin, 9.5);
        assert_eq!(finding.parameter, "Hemoglobin");
        assert_eq!(finding.status, Status::Low);
        assert_eq!(finding.severity, Severity::Moderate);
    }

    #[test]
    fn test_critical_severity_on_either_side() {
        assert_eq!(classify_value(Parameter::Glucose, 450.0).severity, Severity::Critical);
        assert_eq!(classify_value(Parameter::Glucose, 300.0).severity, Severity::Critical);
        assert_eq!(classify_value(Parameter::Glucose, 299.0).severity, Severity::Moderate);
        assert_eq!(classify_value(Parameter::Glucose, 45.0).severity, Severity::Critical);
        assert_eq!(classify_value(Parameter::Hemoglobin, 8.0).severity, Severity::Critical);
    }

    #[test]
    fn test_abnormal_without_limits_is_moderate() {
        let finding = classify_value(Parameter::Rbc, 3.0);
        assert_eq!(finding.status, Status::Low);
        assert_eq!(finding.severity, Severity::Moderate);
    }

    #[test]
    fn test_normal_has_baseline_severity() {
        let finding = classify_value(Parameter::Creatinine, 0.9);
        assert_eq!(finding.status, Status::Normal);
        assert_eq!(finding.severity, Severity::Normal);
        assert_eq!(finding.normal_range, "0.6-1.2");
        assert_eq!(finding.category, Category::Kidney);
    }

    #[test]
    fn test_unknown_name_falls_back_to_general() {
        let finding = classify_named("Ferritin", 5.0);
        assert_eq!(finding.category, Category::General);
        assert_eq!(finding.normal_range, "N/A");
        assert_eq!(finding.status, Status::Normal);
        assert_eq!(finding.kind, None);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::Moderate);
        assert!(Severity::Moderate > Severity::Normal);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(classify_value(Parameter::Glucose, 125.0)).unwrap();
        assert_eq!(json["parameter"], "Glucose");
        assert_eq!(json["status"], "HIGH");
        assert_eq!(json["severity"], "MODERATE");
        assert_eq!(json["normalRange"], "70-100");
        assert_eq!(json["category"], "Diabetes");
        assert!(json.get("kind").is_none());
    }
}
