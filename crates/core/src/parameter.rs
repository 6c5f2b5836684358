//! Lab parameter dictionary: reference ranges, units, categories and
//! critical limits for every parameter the extractor knows about.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grouping label used for per-category analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "CBC")]
    Cbc,
    Lipid,
    Diabetes,
    Liver,
    Kidney,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cbc => "CBC",
            Category::Lipid => "Lipid",
            Category::Diabetes => "Diabetes",
            Category::Liver => "Liver",
            Category::Kidney => "Kidney",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values at or beyond these limits are clinically urgent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalLimits {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl CriticalLimits {
    const NONE: Self = Self {
        low: None,
        high: None,
    };

    const fn both(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    const fn high(high: f64) -> Self {
        Self {
            low: None,
            high: Some(high),
        }
    }

    /// True when the value has crossed either limit in the adverse direction
    pub fn crossed_by(&self, value: f64) -> bool {
        self.low.is_some_and(|low| value <= low) || self.high.is_some_and(|high| value >= high)
    }
}

/// Static description of one lab parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub category: Category,
    pub critical: CriticalLimits,
}

impl ParameterSpec {
    /// Range shown to the patient, e.g. `12-16` or `0.2-1.2`
    pub fn normal_range(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Every parameter the service can recognise in report text.
///
/// Declaration order is the dictionary iteration order: extraction output,
/// scoring and grouping all follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parameter {
    Hemoglobin,
    Hematocrit,
    Rbc,
    Wbc,
    Platelets,
    TotalCholesterol,
    Ldl,
    Hdl,
    Triglycerides,
    Glucose,
    Hba1c,
    Alt,
    Ast,
    Bilirubin,
    Creatinine,
    Bun,
}

impl Parameter {
    pub const ALL: [Parameter; 16] = [
        Parameter::Hemoglobin,
        Parameter::Hematocrit,
        Parameter::Rbc,
        Parameter::Wbc,
        Parameter::Platelets,
        Parameter::TotalCholesterol,
        Parameter::Ldl,
        Parameter::Hdl,
        Parameter::Triglycerides,
        Parameter::Glucose,
        Parameter::Hba1c,
        Parameter::Alt,
        Parameter::Ast,
        Parameter::Bilirubin,
        Parameter::Creatinine,
        Parameter::Bun,
    ];

    /// Reference data for this parameter
    pub fn spec(self) -> &'static ParameterSpec {
        &DICTIONARY[self as usize]
    }

    /// Canonical lowercase identifier, e.g. `total cholesterol`
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Name shown in reports: the canonical name with its first letter capitalised
    pub fn display_name(self) -> &'static str {
        match self {
            Parameter::Hemoglobin => "Hemoglobin",
            Parameter::Hematocrit => "Hematocrit",
            Parameter::Rbc => "Rbc",
            Parameter::Wbc => "Wbc",
            Parameter::Platelets => "Platelets",
            Parameter::TotalCholesterol => "Total cholesterol",
            Parameter::Ldl => "Ldl",
            Parameter::Hdl => "Hdl",
            Parameter::Triglycerides => "Triglycerides",
            Parameter::Glucose => "Glucose",
            Parameter::Hba1c => "Hba1c",
            Parameter::Alt => "Alt",
            Parameter::Ast => "Ast",
            Parameter::Bilirubin => "Bilirubin",
            Parameter::Creatinine => "Creatinine",
            Parameter::Bun => "Bun",
        }
    }

    /// Case-insensitive lookup by canonical or display name
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Indexed by `Parameter as usize`; keep in declaration order.
static DICTIONARY: [ParameterSpec; 16] = [
    ParameterSpec {
        name: "hemoglobin",
        unit: "g/dL",
        min: 12.0,
        max: 16.0,
        category: Category::Cbc,
        critical: CriticalLimits::both(8.0, 20.0),
    },
    ParameterSpec {
        name: "hematocrit",
        unit: "%",
        min: 36.0,
        max: 46.0,
        category: Category::Cbc,
        critical: CriticalLimits::both(25.0, 60.0),
    },
    ParameterSpec {
        name: "rbc",
        unit: "million/μL",
        min: 4.2,
        max: 5.4,
        category: Category::Cbc,
        critical: CriticalLimits::NONE,
    },
    ParameterSpec {
        name: "wbc",
        unit: "1000/μL",
        min: 4.5,
        max: 11.0,
        category: Category::Cbc,
        critical: CriticalLimits::both(2.0, 30.0),
    },
    ParameterSpec {
        name: "platelets",
        unit: "1000/μL",
        min: 150.0,
        max: 450.0,
        category: Category::Cbc,
        critical: CriticalLimits::both(50.0, 1000.0),
    },
    ParameterSpec {
        name: "total cholesterol",
        unit: "mg/dL",
        min: 0.0,
        max: 200.0,
        category: Category::Lipid,
        critical: CriticalLimits::high(300.0),
    },
    ParameterSpec {
        name: "ldl",
        unit: "mg/dL",
        min: 0.0,
        max: 100.0,
        category: Category::Lipid,
        critical: CriticalLimits::high(190.0),
    },
    ParameterSpec {
        name: "hdl",
        unit: "mg/dL",
        min: 40.0,
        max: 999.0,
        category: Category::Lipid,
        critical: CriticalLimits::NONE,
    },
    ParameterSpec {
        name: "triglycerides",
        unit: "mg/dL",
        min: 0.0,
        max: 150.0,
        category: Category::Lipid,
        critical: CriticalLimits::high(500.0),
    },
    ParameterSpec {
        name: "glucose",
        unit: "mg/dL",
        min: 70.0,
        max: 100.0,
        category: Category::Diabetes,
        critical: CriticalLimits::both(50.0, 300.0),
    },
    ParameterSpec {
        name: "hba1c",
        unit: "%",
        min: 0.0,
        max: 5.7,
        category: Category::Diabetes,
        critical: CriticalLimits::high(9.0),
    },
    ParameterSpec {
        name: "alt",
        unit: "U/L",
        min: 7.0,
        max: 35.0,
        category: Category::Liver,
        critical: CriticalLimits::high(200.0),
    },
    ParameterSpec {
        name: "ast",
        unit: "U/L",
        min: 8.0,
        max: 35.0,
        category: Category::Liver,
        critical: CriticalLimits::high(200.0),
    },
    ParameterSpec {
        name: "bilirubin",
        unit: "mg/dL",
        min: 0.2,
        max: 1.2,
        category: Category::Liver,
        critical: CriticalLimits::high(3.0),
    },
    ParameterSpec {
        name: "creatinine",
        unit: "mg/dL",
        min: 0.6,
        max: 1.2,
        category: Category::Kidney,
        critical: CriticalLimits::high(3.0),
    },
    ParameterSpec {
        name: "bun",
        unit: "mg/dL",
        min: 7.0,
        max: 20.0,
        category: Category::Kidney,
        critical: CriticalLimits::high(50.0),
    },
];
