use serde::{Deserialize, Serialize};

/// What a training row is labelled with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Label(String),
    Value(f64),
}

impl Target {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Target::Label(l) => Some(l),
            Target::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<f64> {
        match self {
            Target::Label(_) => None,
            Target::Value(v) => Some(*v),
        }
    }
}

/// One labelled row: ordered feature values plus a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub features: Vec<f64>,
    pub target: Target,
}

impl TrainingSample {
    pub fn labelled(features: Vec<f64>, label: impl Into<String>) -> TrainingSample {
        TrainingSample {
            features,
            target: Target::Label(label.into()),
        }
    }

    pub fn valued(features: Vec<f64>, value: f64) -> TrainingSample {
        TrainingSample {
            features,
            target: Target::Value(value),
        }
    }

    pub fn arity(&self) -> usize {
        self.features.len()
    }
}
