//! Percentile comparison against fixed adult population benchmarks

use serde::Serialize;

use crate::classify::ClassifiedFinding;
use crate::parameter::Parameter;
use crate::patient::{Gender, Patient};

/// Value at the 10th, 25th, 50th, 75th and 90th percentile
type Benchmark = [f64; 5];

const PERCENTILES: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

fn benchmark(parameter: Parameter, gender: Gender) -> Option<Benchmark> {
    let points = match (parameter, gender) {
        (Parameter::TotalCholesterol, _) => [150.0, 170.0, 195.0, 220.0, 245.0],
        (Parameter::Ldl, _) => [75.0, 95.0, 115.0, 140.0, 165.0],
        (Parameter::Hdl, _) => [35.0, 42.0, 52.0, 62.0, 72.0],
        (Parameter::Triglycerides, _) => [60.0, 80.0, 115.0, 160.0, 210.0],
        (Parameter::Glucose, _) => [80.0, 86.0, 93.0, 101.0, 110.0],
        (Parameter::Hba1c, _) => [4.9, 5.2, 5.5, 5.8, 6.2],
        (Parameter::Creatinine, _) => [0.7, 0.8, 0.95, 1.1, 1.25],
        (Parameter::Hemoglobin, Gender::Male) => [13.2, 14.0, 14.9, 15.7, 16.4],
        (Parameter::Hemoglobin, Gender::Female) => [11.8, 12.5, 13.3, 14.0, 14.7],
        _ => return None,
    };
    Some(points)
}

/// `Some(true)` when a higher value is healthier, `None` when neither direction is
fn higher_is_better(parameter: Parameter) -> Option<bool> {
    match parameter {
        Parameter::Hdl => Some(true),
        Parameter::Hemoglobin => None,
        _ => Some(false),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PopulationComparison {
    pub parameter: String,
    pub value: f64,
    pub percentile: u32,
    pub higher_is_better: Option<bool>,
    pub comparison: String,
}

/// Piecewise-linear percentile estimate, clamped to 1..=99
pub fn estimate_percentile(value: f64, points: &Benchmark) -> u32 {
    let first = points[0];
    let last = points[4];

    let raw = if value <= first {
        PERCENTILES[0] * value / first
    } else if value >= last {
        let slope = (PERCENTILES[4] - PERCENTILES[3]) / (last - points[3]);
        PERCENTILES[4] + (value - last) * slope
    } else {
        let i = points.windows(2).position(|w| value < w[1]).unwrap_or(3);
        let (lo, hi) = (points[i], points[i + 1]);
        let t = (value - lo) / (hi - lo);
        PERCENTILES[i] + t * (PERCENTILES[i + 1] - PERCENTILES[i])
    };

    raw.clamp(1.0, 99.0).round() as u32
}

/// Compare every benchmarked finding against the population
pub fn compare(findings: &[ClassifiedFinding], patient: &Patient) -> Vec<PopulationComparison> {
    findings
        .iter()
        .filter_map(|finding| {
            let parameter = finding.kind?;
            let points = benchmark(parameter, patient.gender)?;
            let percentile = estimate_percentile(finding.value, &points);
            let direction = higher_is_better(parameter);

            let comparison = match direction {
                Some(true) => format!(
                    "Your {} is better than {}% of adults",
                    finding.parameter, percentile
                ),
                Some(false) => format!(
                    "Your {} is better than {}% of adults",
                    finding.parameter,
                    100 - percentile
                ),
                None => format!(
                    "Your {} is higher than {}% of adults",
                    finding.parameter, percentile
                ),
            };

            Some(PopulationComparison {
                parameter: finding.parameter.clone(),
                value: finding.value,
                percentile,
                higher_is_better: direction,
                comparison,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_value;

    #[test]
    fn test_percentile_at_benchmark_points() {
        let points = [150.0, 170.0, 195.0, 220.0, 245.0];
        assert_eq!(estimate_percentile(150.0, &points), 10);
        assert_eq!(estimate_percentile(195.0, &points), 50);
        assert_eq!(estimate_percentile(245.0, &points), 90);
        assert_eq!(estimate_percentile(182.5, &points), 38);
    }

    #[test]
    fn test_percentile_is_clamped() {
        let points = [150.0, 170.0, 195.0, 220.0, 245.0];
        assert_eq!(estimate_percentile(1000.0, &points), 99);
        assert_eq!(estimate_percentile(1.0, &points), 1);
    }

    #[test]
    fn test_only_benchmarked_parameters_compared() {
        let findings = vec![
            classify_value(Parameter::Platelets, 300.0),
            classify_value(Parameter::Hdl, 62.0),
        ];
        let result = compare(&findings, &Patient::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].percentile, 75);
        assert_eq!(result[0].comparison, "Your Hdl is better than 75% of adults");
    }

    #[test]
    fn test_lower_is_better_inverts() {
        let result = compare(
            &[classify_value(Parameter::TotalCholesterol, 195.0)],
            &Patient::default(),
        );
        assert_eq!(result[0].higher_is_better, Some(false));
        assert_eq!(result[0].comparison, "Your Total cholesterol is better than 50% of adults");
    }

    #[test]
    fn test_hemoglobin_uses_gender_benchmark() {
        let finding = classify_value(Parameter::Hemoglobin, 14.0);
        let male = compare(&[finding.clone()], &Patient::new(40, Gender::Male));
        let female = compare(&[finding], &Patient::new(40, Gender::Female));
        assert_eq!(male[0].percentile, 25);
        assert_eq!(female[0].percentile, 75);
        assert_eq!(male[0].higher_is_better, None);
    }
}
