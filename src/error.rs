use crate::predictors::TaskKind;
use thiserror::Error;

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

/// Every way the extract / fit / predict / format pipeline can refuse its input.
///
/// All variants are local validation failures: resubmitting the same input
/// fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("missing feature '{name}'")]
    MissingFeature { name: String },

    #[error("feature '{name}' = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("non-finite value for {name}")]
    NonFiniteValue { name: String },

    #[error("training set is empty")]
    EmptyDataset,

    #[error("sample #{sample} has {found} features, expected {expected}")]
    InconsistentArity {
        sample: usize,
        expected: usize,
        found: usize,
    },

    #[error("feature vector has {found} values, model expects {expected}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("sample #{sample} has a target that does not fit a {expected} learner")]
    TargetMismatch { sample: usize, expected: TaskKind },

    #[error("invalid {learner} parameters: {reason}")]
    InvalidLearner {
        learner: &'static str,
        reason: String,
    },

    #[error("invalid feature schema: {reason}")]
    InvalidSchema { reason: String },

    #[error("invalid cell '{value}' at row #{row}, column #{column}")]
    InvalidCell {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("invalid outcome: {reason}")]
    InvalidOutcome { reason: String },

    #[error("month {month} is not in 1..=12")]
    InvalidMonth { month: u32 },

    #[error("{months} months after {start} is past the last representable year")]
    DateOverflow { start: String, months: u32 },

    #[error("unknown commodity '{name}'")]
    UnknownCommodity { name: String },
}
