//! Additive health risk score
//!
//! Every abnormal finding contributes a fixed or tiered number of points and
//! an estimated life-expectancy delta. A few healthy values count as
//! protective factors. Age and gender add fixed adjustments. The result is
//! a display heuristic, not a validated clinical score.

use serde::Serialize;

use crate::classify::{ClassifiedFinding, Status};
use crate::parameter::Parameter;
use crate::patient::{Gender, Patient};

const MAX_RISK_FACTORS: usize = 6;
const MAX_PROTECTIVE_FACTORS: usize = 4;

/// Discrete band derived from the numeric score
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Excellent,
    VeryGood,
    Good,
    Moderate,
    High,
    Critical,
}

/// How quickly the patient should act on the overall score
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    Low,
    Moderate,
    High,
    Urgent,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=5 => RiskLevel::Excellent,
            6..=15 => RiskLevel::VeryGood,
            16..=30 => RiskLevel::Good,
            31..=50 => RiskLevel::Moderate,
            51..=75 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::Excellent => "Outstanding health profile with minimal risk factors",
            RiskLevel::VeryGood => "Very good health with only minor areas to watch",
            RiskLevel::Good => "Good overall health with some factors to improve",
            RiskLevel::Moderate => "Moderate health risk - lifestyle changes recommended",
            RiskLevel::High => "High health risk - medical follow-up recommended",
            RiskLevel::Critical => "Critical health risk - immediate medical attention needed",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Excellent => "Maintain your current lifestyle and schedule annual check-ups",
            RiskLevel::VeryGood => "Keep up healthy habits and recheck borderline values in 6-12 months",
            RiskLevel::Good => "Address the flagged values with diet and exercise and retest in 3-6 months",
            RiskLevel::Moderate => "Book a doctor's appointment within a month and start lifestyle changes now",
            RiskLevel::High => "See a specialist within 1-2 weeks for a treatment plan",
            RiskLevel::Critical => "Seek medical care within 24-48 hours",
        }
    }

    pub fn urgency(&self) -> UrgencyLevel {
        match self {
            RiskLevel::Excellent | RiskLevel::VeryGood | RiskLevel::Good => UrgencyLevel::Low,
            RiskLevel::Moderate => UrgencyLevel::Moderate,
            RiskLevel::High => UrgencyLevel::High,
            RiskLevel::Critical => UrgencyLevel::Urgent,
        }
    }
}

/// One contribution to (or protection against) the overall risk
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactor {
    pub parameter: String,
    pub points: u32,
    pub life_expectancy_impact: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    pub score: u32,
    pub level: RiskLevel,
    pub message: String,
    pub percentile: u32,
    pub life_expectancy_impact: f64,
    pub recommendation: String,
    pub urgency_level: UrgencyLevel,
    pub demographic_points: u32,
    pub risk_factors: Vec<ScoreFactor>,
    pub protective_factors: Vec<ScoreFactor>,
}

/// `clamp(100 - round(score * 1.2), 5, 95)`
pub fn percentile_for(score: u32) -> u32 {
    let raw = 100 - (f64::from(score) * 1.2).round() as i64;
    raw.clamp(5, 95) as u32
}

/// Score the findings for the given patient
pub fn score(findings: &[ClassifiedFinding], patient: &Patient) -> RiskScore {
    let mut risk_factors: Vec<ScoreFactor> = findings.iter().filter_map(risk_factor).collect();
    let mut protective_factors: Vec<ScoreFactor> =
        findings.iter().filter_map(protective_factor).collect();

    let demographic_points = demographic_points(patient);
    let total = risk_factors.iter().map(|f| f.points).sum::<u32>() + demographic_points;

    let years: f64 = risk_factors
        .iter()
        .chain(protective_factors.iter())
        .map(|f| f.life_expectancy_impact)
        .sum();

    risk_factors.truncate(MAX_RISK_FACTORS);
    protective_factors.truncate(MAX_PROTECTIVE_FACTORS);

    let level = RiskLevel::from_score(total);

    RiskScore {
        score: total,
        level,
        message: level.message().to_string(),
        percentile: percentile_for(total),
        life_expectancy_impact: round_one(years),
        recommendation: level.recommendation().to_string(),
        urgency_level: level.urgency(),
        demographic_points,
        risk_factors,
        protective_factors,
    }
}

fn demographic_points(patient: &Patient) -> u32 {
    let age_points = if patient.age > 65 {
        15
    } else if patient.age > 50 {
        8
    } else {
        0
    };
    let gender_points = if patient.gender == Gender::Male && patient.age > 45 {
        5
    } else {
        0
    };
    age_points + gender_points
}

fn round_one(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Pick the tier for `value`: the first `(above, points, years)` whose
/// threshold is exceeded, else the fallback.
fn tiered(value: f64, tiers: &[(f64, u32, f64)], fallback: (u32, f64)) -> (u32, f64) {
    tiers
        .iter()
        .find(|(above, _, _)| value > *above)
        .map(|&(_, points, years)| (points, years))
        .unwrap_or(fallback)
}

fn risk_factor(finding: &ClassifiedFinding) -> Option<ScoreFactor> {
    if !finding.is_abnormal() {
        return None;
    }

    let v = finding.value;
    let ((points, years), label) = match (finding.kind, finding.status) {
        (Some(Parameter::TotalCholesterol), Status::High) => (
            tiered(v, &[(280.0, 20, -3.0), (240.0, 12, -2.0)], (8, -1.0)),
            "High total cholesterol",
        ),
        (Some(Parameter::Ldl), Status::High) => (
            tiered(v, &[(190.0, 20, -3.0), (160.0, 15, -2.0)], (8, -1.0)),
            "High LDL cholesterol",
        ),
        (Some(Parameter::Hdl), Status::Low) => ((10, -1.5), "Low HDL cholesterol"),
        (Some(Parameter::Triglycerides), Status::High) => (
            tiered(v, &[(500.0, 15, -2.0), (200.0, 10, -1.0)], (5, -0.5)),
            "High triglycerides",
        ),
        (Some(Parameter::Glucose), Status::High) => (
            tiered(v, &[(200.0, 25, -5.0), (126.0, 18, -3.0)], (12, -1.5)),
            "High blood glucose",
        ),
        (Some(Parameter::Glucose), Status::Low) => ((8, -0.5), "Low blood glucose"),
        (Some(Parameter::Hba1c), Status::High) => {
            let tier = if v >= 6.5 { (20, -4.0) } else { (10, -1.5) };
            (tier, "Elevated HbA1c")
        }
        (Some(Parameter::Creatinine), Status::High) => (
            tiered(v, &[(2.0, 20, -4.0)], (12, -2.0)),
            "Reduced kidney function",
        ),
        (Some(Parameter::Bun), Status::High) => ((6, -0.5), "High blood urea nitrogen"),
        (Some(Parameter::Alt | Parameter::Ast), Status::High) => (
            tiered(v, &[(105.0, 15, -2.0)], (6, -0.5)),
            "Elevated liver enzyme",
        ),
        (Some(Parameter::Bilirubin), Status::High) => ((6, -0.5), "High bilirubin"),
        (Some(Parameter::Hemoglobin), Status::Low) => {
            let tier = if v < 8.0 {
                (18, -2.0)
            } else if v < 10.0 {
                (12, -1.0)
            } else {
                (6, -0.5)
            };
            (tier, "Low hemoglobin")
        }
        (Some(Parameter::Platelets), Status::Low) => {
            let tier = if v < 50.0 { (20, -2.0) } else { (8, -0.5) };
            (tier, "Low platelet count")
        }
        _ => ((5, -0.5), "Abnormal value"),
    };

    Some(ScoreFactor {
        parameter: finding.parameter.clone(),
        points,
        life_expectancy_impact: years,
        description: format!("{label} ({} {})", v, finding.unit).trim_end().to_string(),
    })
}

fn protective_factor(finding: &ClassifiedFinding) -> Option<ScoreFactor> {
    let v = finding.value;
    let (years, label) = match finding.kind? {
        Parameter::Hdl if v > 60.0 => (2.0, "Excellent HDL cholesterol"),
        Parameter::Ldl if finding.status == Status::Normal && v < 100.0 => {
            (1.0, "Optimal LDL cholesterol")
        }
        Parameter::Glucose if (70.0..=90.0).contains(&v) => (1.0, "Healthy blood sugar"),
        Parameter::TotalCholesterol if finding.status == Status::Normal && v < 170.0 => {
            (1.0, "Low total cholesterol")
        }
        _ => return None,
    };

    Some(ScoreFactor {
        parameter: finding.parameter.clone(),
        points: 0,
        life_expectancy_impact: years,
        description: format!("{label} ({} {})", v, finding.unit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_value;

    fn young() -> Patient {
        Patient::new(30, Gender::Female)
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Excellent);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::VeryGood);
        assert_eq!(RiskLevel::from_score(15), RiskLevel::VeryGood);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Good);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(75), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(76), RiskLevel::Critical);
    }

    #[test]
    fn test_percentile_formula() {
        assert_eq!(percentile_for(0), 95);
        assert_eq!(percentile_for(25), 70);
        assert_eq!(percentile_for(10), 88);
        assert_eq!(percentile_for(80), 5);
        assert_eq!(percentile_for(1000), 5);
    }

    #[test]
    fn test_cholesterol_tiers() {
        let p = young();
        assert_eq!(score(&[classify_value(Parameter::TotalCholesterol, 210.0)], &p).score, 8);
        assert_eq!(score(&[classify_value(Parameter::TotalCholesterol, 245.0)], &p).score, 12);
        assert_eq!(score(&[classify_value(Parameter::TotalCholesterol, 290.0)], &p).score, 20);
    }

    #[test]
    fn test_glucose_tiers_and_years() {
        let p = young();
        let result = score(&[classify_value(Parameter::Glucose, 450.0)], &p);
        assert_eq!(result.score, 25);
        assert_eq!(result.level, RiskLevel::Good);
        assert_eq!(result.percentile, 70);
        assert_eq!(result.life_expectancy_impact, -5.0);
        assert_eq!(score(&[classify_value(Parameter::Glucose, 150.0)], &p).score, 18);
        assert_eq!(score(&[classify_value(Parameter::Glucose, 110.0)], &p).score, 12);
    }

    #[test]
    fn test_demographic_adjustments() {
        let none: [ClassifiedFinding; 0] = [];
        assert_eq!(score(&none, &Patient::new(45, Gender::Male)).score, 0);
        assert_eq!(score(&none, &Patient::new(46, Gender::Male)).score, 5);
        assert_eq!(score(&none, &Patient::new(55, Gender::Female)).score, 8);
        assert_eq!(score(&none, &Patient::new(70, Gender::Male)).score, 20);
        assert_eq!(score(&none, &Patient::new(70, Gender::Female)).demographic_points, 15);
    }

    #[test]
    fn test_hdl_protective_is_strict() {
        let p = young();
        let at = score(&[classify_value(Parameter::Hdl, 60.0)], &p);
        assert!(at.protective_factors.is_empty());
        let above = score(&[classify_value(Parameter::Hdl, 61.0)], &p);
        assert_eq!(above.protective_factors.len(), 1);
        assert_eq!(above.protective_factors[0].parameter, "Hdl");
        assert_eq!(above.life_expectancy_impact, 2.0);
    }

    fn protective(parameter: Parameter, value: f64) -> Vec<String> {
        score(&[classify_value(parameter, value)], &young())
            .protective_factors
            .into_iter()
            .map(|f| f.description)
            .collect()
    }

    #[test]
    fn test_ldl_protective_below_100() {
        assert_eq!(protective(Parameter::Ldl, 99.9), vec!["Optimal LDL cholesterol (99.9 mg/dL)"]);
        assert!(protective(Parameter::Ldl, 100.0).is_empty());
    }

    #[test]
    fn test_glucose_protective_range() {
        assert_eq!(protective(Parameter::Glucose, 70.0).len(), 1);
        assert_eq!(protective(Parameter::Glucose, 90.0), vec!["Healthy blood sugar (90 mg/dL)"]);
        assert!(protective(Parameter::Glucose, 90.1).is_empty());
        assert!(protective(Parameter::Glucose, 69.9).is_empty());
    }

    #[test]
    fn test_total_cholesterol_protective_below_170() {
        assert_eq!(protective(Parameter::TotalCholesterol, 169.0).len(), 1);
        assert!(protective(Parameter::TotalCholesterol, 170.0).is_empty());
    }

    #[test]
    fn test_factor_lists_are_truncated() {
        let findings = vec![
            classify_value(Parameter::Hemoglobin, 9.0),
            classify_value(Parameter::TotalCholesterol, 250.0),
            classify_value(Parameter::Ldl, 170.0),
            classify_value(Parameter::Hdl, 35.0),
            classify_value(Parameter::Triglycerides, 220.0),
            classify_value(Parameter::Glucose, 130.0),
            classify_value(Parameter::Creatinine, 1.5),
            classify_value(Parameter::Bun, 25.0),
        ];
        let result = score(&findings, &young());
        assert_eq!(result.risk_factors.len(), 6);
        assert_eq!(result.risk_factors[0].parameter, "Hemoglobin");
        assert_eq!(result.risk_factors[5].parameter, "Glucose");
        // points from truncated factors still count
        assert_eq!(result.score, 12 + 12 + 15 + 10 + 10 + 18 + 12 + 6);
        // years likewise: -1 -2 -2 -1.5 -1 -3 from the kept six, -2 -0.5 from the rest
        assert_eq!(result.life_expectancy_impact, -13.0);
        assert_eq!(result.level, RiskLevel::Critical);
        assert_eq!(result.percentile, 5);
    }

    #[test]
    fn test_unknown_abnormal_gets_default_points() {
        let mut finding = classify_value(Parameter::Wbc, 12.0);
        assert_eq!(finding.status, Status::High);
        assert_eq!(score(&[finding.clone()], &young()).score, 5);
        finding.kind = None;
        assert_eq!(score(&[finding], &young()).score, 5);
    }
}
