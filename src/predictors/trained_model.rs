use crate::core::FeatureVector;
use crate::core::attributes::LabelDomain;
use crate::error::{PipelineError, Result};
use crate::predictors::learner::{Estimate, Model, TaskKind};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Label(String),
    Value(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub outcome: Outcome,
    /// Probability of the winning class; `None` for regression.
    pub score: Option<f64>,
}

impl PredictionResult {
    pub fn label(label: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            outcome: Outcome::Label(label.into()),
            score,
        }
    }

    pub fn value(value: f64) -> Self {
        Self {
            outcome: Outcome::Value(value),
            score: None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Label(l) => Some(l),
            Outcome::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<f64> {
        match self.outcome {
            Outcome::Label(_) => None,
            Outcome::Value(v) => Some(v),
        }
    }
}

/// A fitted, immutable model. Share it across threads behind an `Arc`.
pub struct TrainedModel {
    learner: &'static str,
    task: TaskKind,
    arity: usize,
    seed: u64,
    labels: Option<LabelDomain>,
    inner: Box<dyn Model>,
}

impl fmt::Debug for TrainedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainedModel")
            .field("learner", &self.learner)
            .field("task", &self.task)
            .field("arity", &self.arity)
            .field("seed", &self.seed)
            .field("labels", &self.labels.as_ref().map(LabelDomain::values))
            .finish_non_exhaustive()
    }
}

impl TrainedModel {
    /// `labels` must be present exactly when `task` is classification, and
    /// `inner` must score one entry per label.
    pub(crate) fn from_parts(
        task: TaskKind,
        arity: usize,
        seed: u64,
        labels: Option<LabelDomain>,
        inner: Box<dyn Model>,
    ) -> TrainedModel {
        TrainedModel {
            learner: inner.name(),
            task,
            arity,
            seed,
            labels,
            inner,
        }
    }

    /// Swaps the fitted estimator, keeping the validated metadata.
    #[cfg(any(test, feature = "test-support"))]
    pub(crate) fn map_inner(self, f: impl FnOnce(Box<dyn Model>) -> Box<dyn Model>) -> TrainedModel {
        TrainedModel {
            inner: f(self.inner),
            ..self
        }
    }

    pub fn learner(&self) -> &'static str {
        self.learner
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The seed the model was fitted with, drawn at fit time if none was
    /// configured.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn labels(&self) -> Option<&LabelDomain> {
        self.labels.as_ref()
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult> {
        if vector.len() != self.arity {
            return Err(PipelineError::ArityMismatch {
                expected: self.arity,
                found: vector.len(),
            });
        }
        if let Some(i) = vector.first_non_finite() {
            return Err(PipelineError::NonFiniteValue {
                name: format!("feature #{i}"),
            });
        }

        let result = match self.inner.estimate(vector.as_slice()) {
            Estimate::ClassProbabilities(probabilities) => self.pick_label(&probabilities)?,
            Estimate::Value(value) if value.is_finite() => PredictionResult::value(value),
            Estimate::Value(value) => {
                return Err(PipelineError::InvalidOutcome {
                    reason: format!("{} produced {value}", self.learner),
                });
            }
        };
        debug!(learner = self.learner, outcome = ?result.outcome, score = ?result.score, "predicted");
        Ok(result)
    }

    /// Argmax over the class weights; ties go to the lowest index.
    fn pick_label(&self, probabilities: &[f64]) -> Result<PredictionResult> {
        let invalid = |reason: String| PipelineError::InvalidOutcome { reason };

        let labels = self
            .labels
            .as_ref()
            .ok_or_else(|| invalid(format!("{} returned classes for a regression model", self.learner)))?;
        if probabilities.len() != labels.len() {
            return Err(invalid(format!(
                "{} scored {} classes, {} were trained",
                self.learner,
                probabilities.len(),
                labels.len()
            )));
        }

        let mut best = 0;
        for (i, &p) in probabilities.iter().enumerate() {
            if p > probabilities[best] {
                best = i;
            }
        }
        let total: f64 = probabilities.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(invalid(format!("{} produced no class weight", self.learner)));
        }

        let label = labels
            .label_at(best)
            .ok_or_else(|| invalid(format!("class index {best} has no label")))?;
        let score = (probabilities[best] / total).clamp(0.0, 1.0);
        Ok(PredictionResult::label(label, Some(score)))
    }
}

pub fn predict(model: &TrainedModel, vector: &FeatureVector) -> Result<PredictionResult> {
    model.predict(vector)
}
