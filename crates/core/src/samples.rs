//! Fixed demo reports used in place of PDF and image text extraction

use chrono::NaiveDate;

const ABNORMAL_TEMPLATE: &str = "COMPREHENSIVE MEDICAL REPORT
Patient: John Doe
Date: {date}
Lab: City Hospital Laboratory

COMPLETE BLOOD COUNT (CBC):
Hemoglobin: 10.5 g/dL (Low - Normal: 12.0-16.0)
Hematocrit: 32.0 % (Low - Normal: 36.0-46.0)
RBC: 4.1 million/μL (Normal: 4.2-5.4)
WBC: 8.2 thousand/μL (Normal: 4.5-11.0)
Platelets: 320 thousand/μL (Normal: 150-450)

LIPID PROFILE:
Total Cholesterol: 245 mg/dL (High - Normal: <200)
LDL Cholesterol: 165 mg/dL (High - Normal: <100)
HDL Cholesterol: 38 mg/dL (Low - Normal: >40)
Triglycerides: 220 mg/dL (High - Normal: <150)

DIABETES PANEL:
Glucose: 125 mg/dL (High - Normal: 70-100)
HbA1c: 6.8 % (High - Normal: <5.7)

LIVER FUNCTION:
ALT: 45 U/L (High - Normal: 7-35)
AST: 38 U/L (High - Normal: 8-35)
Bilirubin: 1.1 mg/dL (Normal: 0.2-1.2)

KIDNEY FUNCTION:
Creatinine: 1.4 mg/dL (High - Normal: 0.6-1.2)
BUN: 25 mg/dL (High - Normal: 7-20)

SUMMARY: Multiple abnormal values detected requiring medical attention.";

const HEALTHY_TEMPLATE: &str = "ANNUAL HEALTH CHECKUP REPORT
Patient: Jane Smith
Date: {date}
Lab: Metro Diagnostics

COMPLETE BLOOD COUNT (CBC):
Hemoglobin: 13.8 g/dL (Normal: 12.0-16.0)
Hematocrit: 41.5 % (Normal: 36.0-46.0)
RBC: 4.6 million/μL (Normal: 4.2-5.4)
WBC: 6.8 thousand/μL (Normal: 4.5-11.0)
Platelets: 285 thousand/μL (Normal: 150-450)

LIPID PROFILE:
Total Cholesterol: 185 mg/dL (Normal: <200)
LDL Cholesterol: 95 mg/dL (Normal: <100)
HDL Cholesterol: 55 mg/dL (Normal: >40)
Triglycerides: 135 mg/dL (Normal: <150)

DIABETES PANEL:
Glucose: 88 mg/dL (Normal: 70-100)
HbA1c: 5.2 % (Normal: <5.7)

LIVER FUNCTION:
ALT: 22 U/L (Normal: 7-35)
AST: 25 U/L (Normal: 8-35)
Bilirubin: 0.8 mg/dL (Normal: 0.2-1.2)

KIDNEY FUNCTION:
Creatinine: 0.9 mg/dL (Normal: 0.6-1.2)
BUN: 16 mg/dL (Normal: 7-20)

SUMMARY: All values within normal limits. Excellent health status.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleReport {
    Abnormal,
    Healthy,
}

impl SampleReport {
    pub const ALL: [SampleReport; 2] = [SampleReport::Abnormal, SampleReport::Healthy];

    /// Pick a sample by rotating through `ALL`
    pub fn nth(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Report text dated `date`
    pub fn render(&self, date: NaiveDate) -> String {
        let template = match self {
            SampleReport::Abnormal => ABNORMAL_TEMPLATE,
            SampleReport::Healthy => HEALTHY_TEMPLATE,
        };
        template.replace("{date}", &date.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{OverallStatus, analyze};
    use crate::patient::Patient;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_render_inserts_date() {
        let text = SampleReport::Healthy.render(date());
        assert!(text.contains("Date: 2026-03-01"));
    }

    #[test]
    fn test_rotation() {
        assert_eq!(SampleReport::nth(0), SampleReport::Abnormal);
        assert_eq!(SampleReport::nth(1), SampleReport::Healthy);
        assert_eq!(SampleReport::nth(2), SampleReport::Abnormal);
    }

    #[test]
    fn test_every_parameter_extracted_from_samples() {
        for sample in SampleReport::ALL {
            let report = analyze(&sample.render(date()), &Patient::default());
            assert_eq!(report.parameters_found, 16, "{sample:?}");
        }
    }

    #[test]
    fn test_sample_statuses() {
        let healthy = analyze(&SampleReport::Healthy.render(date()), &Patient::default());
        assert_eq!(healthy.analysis.overall_status, OverallStatus::Normal);

        let abnormal = analyze(&SampleReport::Abnormal.render(date()), &Patient::default());
        assert_eq!(abnormal.analysis.overall_status, OverallStatus::Critical);
    }
}
