//! Patient demographics used by the risk scorer

use serde::{Deserialize, Serialize};

pub const DEFAULT_AGE: u32 = 45;
const MAX_AGE: u32 = 120;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Parse a free-form gender value, defaulting to male
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("female" | "f") => Gender::Female,
            _ => Gender::Male,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub age: u32,
    pub gender: Gender,
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            gender: Gender::Male,
        }
    }
}

impl Patient {
    pub fn new(age: u32, gender: Gender) -> Self {
        Self {
            age: valid_age(age).unwrap_or(DEFAULT_AGE),
            gender,
        }
    }

    /// Build from raw form fields. Missing or invalid age becomes 45.
    pub fn from_raw(age: Option<&str>, gender: Option<&str>) -> Self {
        let age = age
            .and_then(|a| a.trim().parse::<f64>().ok())
            .filter(|a| a.is_finite() && *a >= 0.0)
            .and_then(|a| valid_age(a.floor() as u32))
            .unwrap_or(DEFAULT_AGE);

        Self {
            age,
            gender: Gender::parse_or_default(gender),
        }
    }
}

fn valid_age(age: u32) -> Option<u32> {
    (1..=MAX_AGE).contains(&age).then_some(age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Patient::from_raw(None, None), Patient::default());
        assert_eq!(Patient::default().age, 45);
        assert_eq!(Patient::default().gender, Gender::Male);
    }

    #[test]
    fn test_invalid_age_falls_back() {
        assert_eq!(Patient::from_raw(Some("abc"), None).age, 45);
        assert_eq!(Patient::from_raw(Some("0"), None).age, 45);
        assert_eq!(Patient::from_raw(Some("-3"), None).age, 45);
        assert_eq!(Patient::from_raw(Some("500"), None).age, 45);
        assert_eq!(Patient::new(0, Gender::Female).age, 45);
    }

    #[test]
    fn test_valid_fields() {
        let patient = Patient::from_raw(Some(" 67 "), Some("Female"));
        assert_eq!(patient.age, 67);
        assert_eq!(patient.gender, Gender::Female);
    }

    #[test]
    fn test_unknown_gender_is_male() {
        assert_eq!(Gender::parse_or_default(Some("other")), Gender::Male);
    }
}
