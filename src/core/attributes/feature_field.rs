use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inclusive bounds a feature value must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> ValueRange {
        ValueRange { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// One named numeric input of a model, optionally bounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
}

impl FeatureField {
    pub fn new(name: impl Into<String>) -> FeatureField {
        FeatureField {
            name: name.into(),
            range: None,
        }
    }

    pub fn with_range(name: impl Into<String>, min: f64, max: f64) -> FeatureField {
        FeatureField {
            name: name.into(),
            range: Some(ValueRange::new(min, max)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self, value: f64) -> bool {
        self.range.is_none_or(|r| r.contains(value))
    }
}
