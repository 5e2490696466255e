pub mod bayes;
pub mod forest;
mod learner;
mod predictor;
mod trained_model;
pub mod tree;

pub use learner::{Estimate, Learner, Model, TaskKind, Targets, TrainingMatrix};
pub use predictor::{fit, fit_with};
pub use trained_model::{Outcome, PredictionResult, TrainedModel, predict};
