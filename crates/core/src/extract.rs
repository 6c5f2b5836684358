//! Regex extraction of lab values from free report text

use std::sync::LazyLock;

use regex::Regex;

use crate::parameter::Parameter;

/// One parameter's value as found in the report text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedValue {
    pub parameter: Parameter,
    pub raw_value: f64,
}

/// Synonyms, separator, numeric capture and optional unit for each parameter.
fn pattern_source(parameter: Parameter) -> &'static str {
    match parameter {
        Parameter::Hemoglobin => {
            r"(?i)\b(?:hemoglobin|hb|haemoglobin)[\s:]*(\d+\.?\d*)\s*(?:g/dl|gm/dl|g/l)?"
        }
        Parameter::Hematocrit => r"(?i)\b(?:hematocrit|hct|haematocrit)[\s:]*(\d+\.?\d*)\s*%?",
        Parameter::Rbc => r"(?i)\b(?:rbc|red blood cell)[\s:]*(\d+\.?\d*)\s*(?:million/μl|mill/cmm)?",
        Parameter::Wbc => {
            r"(?i)\b(?:wbc|white blood cell)[\s:]*(\d+\.?\d*)\s*(?:thousand/μl|thou/cmm|k/cmm)?"
        }
        Parameter::Platelets => {
            r"(?i)\b(?:platelets?|plt)[\s:]*(\d+\.?\d*)\s*(?:thousand/μl|thou/cmm|k/cmm)?"
        }
        Parameter::TotalCholesterol => {
            r"(?i)\b(?:total cholesterol|cholesterol total|cholesterol)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?"
        }
        Parameter::Ldl => {
            r"(?i)\b(?:ldl|low density lipoprotein|ldl cholesterol)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?"
        }
        Parameter::Hdl => {
            r"(?i)\b(?:hdl|high density lipoprotein|hdl cholesterol)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?"
        }
        Parameter::Triglycerides => r"(?i)\b(?:triglycerides?|tg)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?",
        Parameter::Glucose => {
            r"(?i)\b(?:glucose|blood sugar|fasting glucose)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?"
        }
        Parameter::Hba1c => {
            r"(?i)\b(?:hba1c|glycated hemoglobin|glycosylated hemoglobin)[\s:]*(\d+\.?\d*)\s*%?"
        }
        Parameter::Alt => {
            r"(?i)\b(?:alt|alanine aminotransferase|sgpt)[\s:]*(\d+\.?\d*)\s*(?:u/l|iu/l)?"
        }
        Parameter::Ast => {
            r"(?i)\b(?:ast|aspartate aminotransferase|sgot)[\s:]*(\d+\.?\d*)\s*(?:u/l|iu/l)?"
        }
        Parameter::Bilirubin => {
            r"(?i)\b(?:bilirubin|total bilirubin)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?"
        }
        Parameter::Creatinine => r"(?i)\b(?:creatinine|creat)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?",
        Parameter::Bun => {
            r"(?i)\b(?:bun|blood urea nitrogen|urea nitrogen)[\s:]*(\d+\.?\d*)\s*(?:mg/dl)?"
        }
    }
}

/// Compiled patterns in dictionary order
static PATTERNS: LazyLock<Vec<(Parameter, Regex)>> = LazyLock::new(|| {
    Parameter::ALL
        .into_iter()
        .map(|p| {
            let regex = Regex::new(pattern_source(p)).expect("parameter pattern must compile");
            (p, regex)
        })
        .collect()
});

/// Find the value of a single parameter. Only the first match counts.
pub fn extract_one(text: &str, parameter: Parameter) -> Option<f64> {
    let (_, regex) = PATTERNS.iter().find(|(p, _)| *p == parameter)?;
    first_value(regex, text)
}

/// Extract at most one value per known parameter, in dictionary order.
///
/// Captures that do not parse to a finite positive number are skipped.
pub fn extract(text: &str) -> Vec<ExtractedValue> {
    PATTERNS
        .iter()
        .filter_map(|(parameter, regex)| {
            first_value(regex, text).map(|raw_value| ExtractedValue {
                parameter: *parameter,
                raw_value,
            })
        })
        .collect()
}

fn first_value(regex: &Regex, text: &str) -> Option<f64> {
    let captures = regex.captures(text)?;
    captures
        .get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_simple_value() {
        let values = extract("Hemoglobin: 9.5 g/dL");
        assert_eq!(
            values,
            vec![ExtractedValue {
                parameter: Parameter::Hemoglobin,
                raw_value: 9.5
            }]
        );
    }

    #[test]
    fn test_synonyms_case_insensitive() {
        assert_eq!(extract_one("HAEMOGLOBIN 13.1", Parameter::Hemoglobin), Some(13.1));
        assert_eq!(extract_one("sgpt: 40 IU/L", Parameter::Alt), Some(40.0));
        assert_eq!(extract_one("Blood Sugar 110", Parameter::Glucose), Some(110.0));
        assert_eq!(extract_one("PLT 210 k/cmm", Parameter::Platelets), Some(210.0));
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Glucose: 95 mg/dL\nRepeat glucose: 180 mg/dL";
        assert_eq!(extract_one(text, Parameter::Glucose), Some(95.0));
    }

    #[test]
    fn test_zero_value_is_skipped() {
        assert!(extract("Creatinine: 0 mg/dL").is_empty());
        assert_eq!(extract_one("Glucose: 0.0", Parameter::Glucose), None);
    }

    #[test]
    fn test_overlapping_lipid_names_resolve_per_pattern() {
        let text = "Total Cholesterol: 245 mg/dL\nLDL Cholesterol: 165 mg/dL\nHDL Cholesterol: 38 mg/dL";
        assert_eq!(extract_one(text, Parameter::TotalCholesterol), Some(245.0));
        assert_eq!(extract_one(text, Parameter::Ldl), Some(165.0));
        assert_eq!(extract_one(text, Parameter::Hdl), Some(38.0));
    }

    #[test]
    fn test_hba1c_does_not_feed_hemoglobin() {
        let values = extract("HbA1c: 6.8 %");
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].parameter, Parameter::Hba1c);
    }

    #[test]
    fn test_word_boundary_blocks_embedded_synonyms() {
        assert_eq!(extract_one("Cobalt 12", Parameter::Alt), None);
        assert_eq!(extract_one("ALT 12", Parameter::Alt), Some(12.0));
    }

    #[test]
    fn test_names_glued_to_previous_word_are_not_found() {
        // the same boundary that rejects "Cobalt" also rejects run-together labels
        assert!(extract("TotalCholesterol: 245 mg/dL").is_empty());
        assert_eq!(
            extract_one("Total Cholesterol: 245 mg/dL", Parameter::TotalCholesterol),
            Some(245.0)
        );
    }

    #[test]
    fn test_output_follows_dictionary_order() {
        let text = "BUN: 18\nGlucose: 90\nHemoglobin: 14";
        let order: Vec<Parameter> = extract(text).into_iter().map(|v| v.parameter).collect();
        assert_eq!(
            order,
            vec![Parameter::Hemoglobin, Parameter::Glucose, Parameter::Bun]
        );
    }

    #[test]
    fn test_irrelevant_text_yields_nothing() {
        assert!(extract("The quick brown fox jumps over the lazy dog.").is_empty());
    }
}
