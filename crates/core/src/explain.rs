//! Plain-language explanation templates for classified findings

use serde::Serialize;

use crate::classify::{ClassifiedFinding, Severity, Status};
use crate::parameter::Parameter;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Explanation {
    pub simple: String,
    pub detailed: String,
}

/// A finding together with its patient-facing explanation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailedFinding {
    pub test: String,
    pub value: f64,
    pub unit: String,
    pub normal_range: String,
    pub status: Status,
    pub severity: Severity,
    pub explanation: Explanation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_remedies: Option<Vec<String>>,
}

struct Template {
    simple: String,
    detailed: String,
    recommendations: &'static [&'static str],
    home_remedies: &'static [&'static str],
}

impl Template {
    fn text(simple: String, detailed: impl Into<String>) -> Self {
        Self {
            simple,
            detailed: detailed.into(),
            recommendations: &[],
            home_remedies: &[],
        }
    }

    fn advice(
        mut self,
        recommendations: &'static [&'static str],
        home_remedies: &'static [&'static str],
    ) -> Self {
        self.recommendations = recommendations;
        self.home_remedies = home_remedies;
        self
    }
}

/// Build the explanation for one finding. Output depends only on the input.
pub fn explain(finding: &ClassifiedFinding) -> DetailedFinding {
    let template = finding
        .kind
        .and_then(|p| known_template(p, finding.status, finding.value))
        .unwrap_or_else(|| generic_template(&finding.parameter, finding.status, finding.value));

    DetailedFinding {
        test: finding.parameter.clone(),
        value: finding.value,
        unit: finding.unit.clone(),
        normal_range: finding.normal_range.clone(),
        status: finding.status,
        severity: finding.severity,
        explanation: Explanation {
            simple: template.simple,
            detailed: template.detailed,
        },
        recommendations: non_empty(template.recommendations),
        home_remedies: non_empty(template.home_remedies),
    }
}

fn non_empty(items: &[&str]) -> Option<Vec<String>> {
    if items.is_empty() {
        None
    } else {
        Some(items.iter().map(|s| s.to_string()).collect())
    }
}

fn known_template(parameter: Parameter, status: Status, value: f64) -> Option<Template> {
    let template = match (parameter, status) {
        (Parameter::Hemoglobin, Status::Low) => Template::text(
            format!("Your hemoglobin ({value}) is low. This means your blood doesn't carry enough oxygen, which can make you feel tired and weak."),
            "Low hemoglobin indicates anemia, which can be caused by iron deficiency, blood loss, chronic disease, or poor nutrition. This condition reduces your blood's ability to carry oxygen to your body's tissues.",
        )
        .advice(
            &[
                "Consult a hematologist or primary care doctor",
                "Get iron studies and B12/folate levels checked",
                "Consider iron supplementation under medical supervision",
            ],
            &[
                "Eat iron-rich foods like spinach, red meat, and lentils",
                "Take vitamin C with iron-rich meals",
                "Avoid tea and coffee with meals",
                "Cook in iron pans",
            ],
        ),
        (Parameter::Hemoglobin, Status::High) => Template::text(
            format!("Your hemoglobin ({value}) is high. This could be due to dehydration, smoking, or living at high altitude."),
            "Elevated hemoglobin may indicate dehydration, smoking, chronic lung disease, or polycythemia vera. High hemoglobin can make blood thicker and increase clotting risk.",
        )
        .advice(
            &[
                "Stay well hydrated",
                "Quit smoking if applicable",
                "See a doctor to rule out lung or blood disorders",
            ],
            &[
                "Drink 8-10 glasses of water daily",
                "Avoid smoking and secondhand smoke",
                "Exercise moderately",
            ],
        ),
        (Parameter::Hemoglobin, Status::Normal) => Template::text(
            format!("Your hemoglobin ({value}) is normal. Your blood is carrying oxygen efficiently throughout your body."),
            "Normal hemoglobin levels indicate healthy red blood cell production and adequate iron stores, supporting optimal oxygen delivery to tissues.",
        ),
        (Parameter::TotalCholesterol, Status::High) => Template::text(
            format!("Your cholesterol ({value}) is high. This increases your risk of heart disease and stroke by clogging your arteries."),
            "Elevated cholesterol leads to atherosclerosis (plaque buildup in arteries), increasing risk of heart attack, stroke, and peripheral artery disease. This is a major modifiable cardiovascular risk factor.",
        )
        .advice(
            &[
                "See a cardiologist within 4 weeks",
                "Start a heart-healthy diet immediately",
                "Begin regular aerobic exercise",
                "Consider statin medication evaluation",
            ],
            &[
                "Eat oats, barley, and beans for soluble fiber",
                "Use olive oil instead of butter",
                "Eat fatty fish twice weekly",
                "Limit saturated and trans fats",
            ],
        ),
        (Parameter::TotalCholesterol, Status::Normal) => Template::text(
            format!("Your cholesterol ({value}) is in a healthy range. This is excellent for your heart and blood vessel health."),
            "Optimal cholesterol levels significantly reduce cardiovascular disease risk and support healthy blood flow throughout your circulatory system.",
        ),
        (Parameter::Ldl, Status::High) => Template::text(
            format!("Your LDL or \"bad\" cholesterol ({value}) is high. Extra LDL can build up in your artery walls over time."),
            "Elevated LDL cholesterol is the main driver of arterial plaque. Lowering it reduces the long-term risk of heart attack and stroke.",
        )
        .advice(
            &[
                "Discuss LDL targets with a cardiologist or primary care doctor",
                "Repeat a fasting lipid panel in 3 months",
                "Ask whether cholesterol-lowering medication is appropriate",
            ],
            &[
                "Replace saturated fats with nuts, seeds, and olive oil",
                "Add soluble fiber such as oats and psyllium",
                "Walk briskly for 30 minutes most days",
            ],
        ),
        (Parameter::Ldl, Status::Normal) => Template::text(
            format!("Your LDL cholesterol ({value}) is at a healthy level. Less of it is settling in your arteries."),
            "LDL within the optimal range lowers the rate of plaque formation and is associated with reduced cardiovascular risk.",
        ),
        (Parameter::Hdl, Status::Low) => Template::text(
            format!("Your HDL or \"good\" cholesterol ({value}) is low. HDL helps clear excess cholesterol, so low levels offer less protection for your heart."),
            "Low HDL is an independent cardiovascular risk factor, often linked to inactivity, smoking, excess weight, and insulin resistance.",
        )
        .advice(
            &[
                "Review overall heart risk with your doctor",
                "Check blood sugar and triglycerides alongside HDL",
            ],
            &[
                "Increase aerobic exercise gradually",
                "Stop smoking",
                "Choose healthy fats such as avocado and fatty fish",
            ],
        ),
        (Parameter::Hdl, Status::Normal) => Template::text(
            format!("Your HDL cholesterol ({value}) is in a good range. It helps protect your heart by removing extra cholesterol."),
            "Adequate HDL supports reverse cholesterol transport, carrying cholesterol from the arteries back to the liver for removal.",
        ),
        (Parameter::Triglycerides, Status::High) => Template::text(
            format!("Your triglycerides ({value}) are high. These are fats in your blood that rise with sugar, alcohol, and extra calories."),
            "Elevated triglycerides contribute to arterial hardening and, at very high levels, can inflame the pancreas. They often accompany insulin resistance.",
        )
        .advice(
            &[
                "Discuss results with your doctor",
                "Screen for diabetes and thyroid problems",
                "Repeat the test after 12 hours of fasting",
            ],
            &[
                "Cut back on sugary drinks and sweets",
                "Limit alcohol",
                "Eat fatty fish rich in omega-3",
            ],
        ),
        (Parameter::Triglycerides, Status::Normal) => Template::text(
            format!("Your triglycerides ({value}) are normal. Your body is handling fats from your diet well."),
            "Normal triglyceride levels indicate efficient fat metabolism and lower cardiovascular risk.",
        ),
        (Parameter::Glucose, Status::High) => Template::text(
            format!("Your blood sugar ({value}) is high. This suggests your body may have trouble controlling sugar levels, possibly indicating diabetes."),
            "Elevated glucose indicates impaired glucose metabolism, suggesting prediabetes or diabetes mellitus. Chronic high blood sugar can damage blood vessels, nerves, kidneys, and eyes.",
        )
        .advice(
            &[
                "URGENT: See an endocrinologist within 1-2 weeks",
                "Start blood glucose monitoring",
                "Begin carbohydrate counting",
                "Consider diabetes medication evaluation",
            ],
            &[
                "Eliminate sugary foods and refined carbs",
                "Exercise 30 minutes after meals",
                "Eat high-fiber vegetables",
                "Control portion sizes strictly",
            ],
        ),
        (Parameter::Glucose, Status::Low) => Template::text(
            format!("Your blood sugar ({value}) is low. This can cause shakiness, sweating, confusion, or dizziness."),
            "Low glucose (hypoglycemia) can follow prolonged fasting, heavy exercise, alcohol, or diabetes medication, and occasionally hormonal disorders.",
        )
        .advice(
            &[
                "Tell your doctor, especially if you take diabetes medication",
                "Recheck glucose if you feel shaky or faint",
            ],
            &[
                "Eat regular meals and snacks",
                "Keep a fast-acting sugar source with you",
            ],
        ),
        (Parameter::Glucose, Status::Normal) => Template::text(
            format!("Your blood sugar ({value}) is normal. Your body is effectively managing glucose levels."),
            "Normal glucose levels indicate proper insulin function and effective carbohydrate metabolism, reducing diabetes and cardiovascular disease risk.",
        ),
        (Parameter::Hba1c, Status::High) => Template::text(
            format!("Your HbA1c ({value}%) is high. This shows your average blood sugar has been elevated over the past 2-3 months."),
            "HbA1c between 5.7% and 6.4% indicates prediabetes; 6.5% or higher is consistent with diabetes. It reflects long-term glucose exposure rather than a single reading.",
        )
        .advice(
            &[
                "See an endocrinologist or primary care doctor",
                "Repeat HbA1c in 3 months to track progress",
            ],
            &[
                "Reduce refined carbohydrates",
                "Aim for 150 minutes of activity per week",
                "Lose 5-7% of body weight if overweight",
            ],
        ),
        (Parameter::Hba1c, Status::Normal) => Template::text(
            format!("Your HbA1c ({value}%) is normal. Your average blood sugar has been well controlled."),
            "A normal HbA1c indicates healthy long-term glucose control.",
        ),
        (Parameter::Creatinine, Status::High) => Template::text(
            format!("Your creatinine ({value}) is high. This suggests your kidneys may not be filtering waste from your blood as effectively as they should."),
            "Elevated creatinine indicates reduced kidney function (decreased glomerular filtration rate), which can progress to chronic kidney disease if not addressed. Early intervention is crucial.",
        )
        .advice(
            &[
                "See a nephrologist within 2 weeks",
                "Get complete kidney function panel",
                "Monitor blood pressure closely",
                "Review all medications with doctor",
            ],
            &[
                "Stay well hydrated with water",
                "Reduce protein intake moderately",
                "Avoid NSAIDs (ibuprofen, naproxen)",
                "Control blood pressure and diabetes",
            ],
        ),
        (Parameter::Creatinine, Status::Normal) => Template::text(
            format!("Your creatinine ({value}) is normal. Your kidneys are filtering waste products effectively."),
            "Normal creatinine levels indicate healthy kidney function and proper waste filtration, supporting overall metabolic health.",
        ),
        (Parameter::Alt | Parameter::Ast, Status::High) => {
            let name = liver_enzyme(parameter);
            Template::text(
                format!("Your {name} ({value}) is high. This liver enzyme leaks into the blood when liver cells are irritated or damaged."),
                format!("Elevated {name} can result from fatty liver, alcohol, viral hepatitis, or certain medications. Mild rises are common and often reversible."),
            )
            .advice(
                &[
                    "See a doctor about a liver function follow-up",
                    "Review medications and supplements that affect the liver",
                    "Consider hepatitis screening",
                ],
                &[
                    "Avoid alcohol",
                    "Reduce fried and processed foods",
                    "Maintain a healthy weight",
                ],
            )
        }
        (Parameter::Alt | Parameter::Ast, Status::Normal) => {
            let name = liver_enzyme(parameter);
            Template::text(
                format!("Your {name} ({value}) is normal. Your liver is working well."),
                format!("Normal {name} suggests no active liver cell injury."),
            )
        }
        _ => return None,
    };

    Some(template)
}

fn liver_enzyme(parameter: Parameter) -> &'static str {
    match parameter {
        Parameter::Ast => "AST",
        _ => "ALT",
    }
}

fn generic_template(name: &str, status: Status, value: f64) -> Template {
    match status {
        Status::High => Template::text(
            format!("Your {name} ({value}) is higher than normal. This may indicate a health condition that needs medical attention."),
            format!("Elevated {name} levels can indicate various underlying conditions and should be evaluated by a healthcare professional for proper diagnosis and treatment."),
        )
        .advice(
            &[
                "Consult your healthcare provider",
                "Follow up with additional tests as recommended",
                "Monitor symptoms",
            ],
            &[],
        ),
        Status::Low => Template::text(
            format!("Your {name} ({value}) is lower than normal. This may indicate a deficiency or health condition."),
            format!("Low {name} levels can indicate deficiencies or underlying health conditions requiring medical evaluation and appropriate treatment."),
        )
        .advice(
            &[
                "Consult your healthcare provider",
                "Consider nutritional assessment",
                "Follow up with additional tests",
            ],
            &[],
        ),
        Status::Normal => Template::text(
            format!("Your {name} ({value}) is within the normal range. This is a good sign for your health."),
            format!("Normal {name} levels indicate proper physiological function in this area of your health."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify_named, classify_value};

    #[test]
    fn test_low_hemoglobin_has_advice() {
        let detail = explain(&classify_value(Parameter::Hemoglobin, 9.5));
        assert!(detail.explanation.simple.contains("(9.5) is low"));
        assert_eq!(detail.recommendations.as_ref().map(Vec::len), Some(3));
        assert_eq!(detail.home_remedies.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_normal_known_parameter_has_no_advice() {
        let detail = explain(&classify_value(Parameter::Glucose, 88.0));
        assert!(detail.explanation.simple.starts_with("Your blood sugar (88) is normal"));
        assert!(detail.recommendations.is_none());
        assert!(detail.home_remedies.is_none());

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("recommendations").is_none());
        assert!(json.get("homeRemedies").is_none());
    }

    #[test]
    fn test_generic_template_interpolates_name() {
        let detail = explain(&classify_value(Parameter::Platelets, 500.0));
        assert_eq!(
            detail.explanation.simple,
            "Your Platelets (500) is higher than normal. This may indicate a health condition that needs medical attention."
        );
        assert!(detail.home_remedies.is_none());
        assert_eq!(detail.recommendations.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_unknown_parameter_uses_generic_normal() {
        let detail = explain(&classify_named("Ferritin", 80.0));
        assert!(detail.explanation.simple.contains("Ferritin (80) is within the normal range"));
    }

    #[test]
    fn test_liver_enzymes_named_in_text() {
        let detail = explain(&classify_value(Parameter::Ast, 50.0));
        assert!(detail.explanation.simple.starts_with("Your AST (50) is high"));
    }

    #[test]
    fn test_deterministic() {
        let finding = classify_value(Parameter::Creatinine, 1.4);
        assert_eq!(explain(&finding), explain(&finding));
    }
}
