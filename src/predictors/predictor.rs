use crate::config::choices::LearnerChoice;
use crate::core::attributes::LabelDomain;
use crate::core::{Target, TrainingSample};
use crate::error::{PipelineError, Result};
use crate::predictors::learner::{Learner, TaskKind, Targets, TrainingMatrix};
use crate::predictors::trained_model::TrainedModel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

/// Fits the learner described by `choice`. Parameters are checked the same
/// way as when the choice is parsed from configuration.
pub fn fit(samples: &[TrainingSample], choice: &LearnerChoice) -> Result<TrainedModel> {
    choice
        .validate()
        .map_err(|e| PipelineError::InvalidLearner {
            learner: choice.kind().into(),
            reason: format!("{e:#}"),
        })?;
    fit_with(samples, choice.build_learner().as_ref())
}

/// Validates `samples` against the learner's task, then fits it.
///
/// Nothing is learned unless every sample passes validation.
pub fn fit_with(samples: &[TrainingSample], learner: &dyn Learner) -> Result<TrainedModel> {
    let (arity, labels, targets) = validate(samples, learner.task())?;

    let seed = match learner.seed() {
        Some(seed) => seed,
        None => {
            let drawn = rand::rng().random::<u64>();
            if learner.is_randomized() {
                warn!(learner = learner.name(), seed = drawn, "no seed configured, drew one");
            }
            drawn
        }
    };

    let rows = samples.iter().map(|s| s.features.clone()).collect();
    let matrix = TrainingMatrix::new(rows, targets, arity);
    let mut rng = StdRng::seed_from_u64(seed);
    let inner = learner.fit_matrix(&matrix, &mut rng);

    info!(
        learner = learner.name(),
        samples = samples.len(),
        arity,
        seed,
        classes = labels.as_ref().map_or(0, LabelDomain::len),
        "model fitted"
    );
    Ok(TrainedModel::from_parts(
        learner.task(),
        arity,
        seed,
        labels,
        inner,
    ))
}

fn validate(
    samples: &[TrainingSample],
    task: TaskKind,
) -> Result<(usize, Option<LabelDomain>, Targets)> {
    let Some(first) = samples.first() else {
        return Err(PipelineError::EmptyDataset);
    };
    let arity = first.arity();

    for (i, sample) in samples.iter().enumerate() {
        if sample.arity() != arity {
            return Err(PipelineError::InconsistentArity {
                sample: i,
                expected: arity,
                found: sample.arity(),
            });
        }
        if let Some(f) = sample.features.iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::NonFiniteValue {
                name: format!("feature #{f} of sample #{i}"),
            });
        }
        match (&sample.target, task) {
            (Target::Label(_), TaskKind::Classification) => {}
            (Target::Value(v), TaskKind::Regression) => {
                if !v.is_finite() {
                    return Err(PipelineError::NonFiniteValue {
                        name: format!("target of sample #{i}"),
                    });
                }
            }
            _ => {
                return Err(PipelineError::TargetMismatch {
                    sample: i,
                    expected: task,
                });
            }
        }
    }

    match task {
        TaskKind::Classification => {
            let domain =
                LabelDomain::from_labels(samples.iter().filter_map(|s| s.target.as_label()));
            let indices = samples
                .iter()
                .filter_map(|s| s.target.as_label())
                .filter_map(|l| domain.index_of(l))
                .collect();
            let targets = Targets::Classes {
                indices,
                n_classes: domain.len(),
            };
            Ok((arity, Some(domain), targets))
        }
        TaskKind::Regression => {
            let values = samples.iter().filter_map(|s| s.target.as_value()).collect();
            Ok((arity, None, Targets::Values(values)))
        }
    }
}
