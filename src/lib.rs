//! Tabular prediction core for agricultural decision support: named numeric
//! readings are validated into feature vectors, fed to a fitted tree, forest
//! or naive Bayes model, and the outcome is rendered for display.

pub mod config;
pub mod core;
pub mod error;
pub mod extraction;
pub mod formatting;
pub mod predictors;
pub mod tasks;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use crate::core::{FeatureSchema, FeatureVector, Target, TrainingSample, samples_from_table};
pub use crate::error::{PipelineError, Result};
pub use crate::extraction::{InputSource, extract};
pub use crate::formatting::{OutcomeFormatter, format};
pub use crate::predictors::{Outcome, PredictionResult, TaskKind, TrainedModel, fit, predict};
