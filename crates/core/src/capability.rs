use serde::{Deserialize, Serialize};

use crate::parameter::Parameter;

/// Self-description served at `/metadata`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCapabilities {
    pub service: String,
    pub version: String,
    pub status: String,
    pub upload_formats: Vec<String>,
    pub parameters: Vec<ParameterCapability>,
}

impl ServiceCapabilities {
    pub fn new() -> Self {
        Self {
            service: "medicue".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "active".to_string(),
            upload_formats: vec![
                "text/plain".to_string(),
                "application/pdf".to_string(),
                "image/*".to_string(),
            ],
            parameters: Parameter::ALL
                .iter()
                .map(|p| ParameterCapability::from(*p))
                .collect(),
        }
    }
}

impl Default for ServiceCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

/// One recognised lab parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterCapability {
    pub name: String,
    pub unit: String,
    pub normal_range: String,
    pub category: String,
}

impl From<Parameter> for ParameterCapability {
    fn from(parameter: Parameter) -> Self {
        let spec = parameter.spec();
        Self {
            name: parameter.name().to_string(),
            unit: spec.unit.to_string(),
            normal_range: spec.normal_range(),
            category: spec.category.as_str().to_string(),
        }
    }
}
