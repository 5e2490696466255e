use crate::core::estimators::GaussianEstimator;
use crate::predictors::learner::{Estimate, Learner, Model, TaskKind, Targets, TrainingMatrix};
use rand::rngs::StdRng;
use tracing::debug;

pub const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;
const MIN_SMOOTHING: f64 = 1e-9;

/// Gaussian naive Bayes over numeric features.
#[derive(Debug, Clone, PartialEq)]
pub struct NaiveBayes {
    var_smoothing: f64,
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new(DEFAULT_VAR_SMOOTHING)
    }
}

impl NaiveBayes {
    pub fn new(var_smoothing: f64) -> Self {
        Self { var_smoothing }
    }

    pub fn var_smoothing(&self) -> f64 {
        self.var_smoothing
    }
}

impl Learner for NaiveBayes {
    fn name(&self) -> &'static str {
        "naive-bayes"
    }

    fn task(&self) -> TaskKind {
        TaskKind::Classification
    }

    fn seed(&self) -> Option<u64> {
        None
    }

    fn is_randomized(&self) -> bool {
        false
    }

    fn fit_matrix(&self, matrix: &TrainingMatrix, _rng: &mut StdRng) -> Box<dyn Model> {
        Box::new(self.fit_model(matrix))
    }
}

impl NaiveBayes {
    fn fit_model(&self, matrix: &TrainingMatrix) -> NaiveBayesModel {
        let (classes, n_classes): (&[usize], usize) = match matrix.targets() {
            Targets::Classes { indices, n_classes } => (indices, *n_classes),
            Targets::Values(_) => (&[], 1),
        };
        let arity = matrix.arity();

        let mut class_weights = vec![0.0; n_classes];
        let mut observers = vec![vec![GaussianEstimator::new(); arity]; n_classes];
        for (row, &class) in classes.iter().enumerate() {
            class_weights[class] += 1.0;
            for f in 0..arity {
                let x = matrix.value(row, f);
                observers[class][f].add_observation(x, 1.0);
            }
        }

        let mut overall = vec![GaussianEstimator::new(); arity];
        for per_class in &observers {
            for (total, observer) in overall.iter_mut().zip(per_class) {
                total.merge(observer);
            }
        }
        let max_variance = overall
            .iter()
            .map(GaussianEstimator::variance)
            .fold(0.0, f64::max);
        let smoothing = (self.var_smoothing * max_variance).max(MIN_SMOOTHING);

        let total: f64 = class_weights.iter().sum();
        let log_priors = class_weights
            .iter()
            .map(|w| if total > 0.0 { (w / total).ln() } else { 0.0 })
            .collect();

        debug!(classes = n_classes, smoothing, "naive bayes fitted");
        NaiveBayesModel {
            log_priors,
            observers,
            smoothing,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    log_priors: Vec<f64>,
    /// `observers[class][feature]`
    observers: Vec<Vec<GaussianEstimator>>,
    smoothing: f64,
}

impl NaiveBayesModel {
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    fn joint_log_likelihood(&self, row: &[f64]) -> Vec<f64> {
        self.log_priors
            .iter()
            .zip(&self.observers)
            .map(|(prior, per_feature)| {
                prior
                    + per_feature
                        .iter()
                        .zip(row)
                        .map(|(obs, &x)| obs.log_density(x, self.smoothing))
                        .sum::<f64>()
            })
            .collect()
    }
}

/// Normalises log scores into probabilities without overflowing.
fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return vec![1.0 / scores.len() as f64; scores.len()];
    }
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

impl Model for NaiveBayesModel {
    fn name(&self) -> &'static str {
        "naive-bayes"
    }

    fn estimate(&self, row: &[f64]) -> Estimate {
        Estimate::ClassProbabilities(softmax(&self.joint_log_likelihood(row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn matrix(rows: Vec<Vec<f64>>, classes: Vec<usize>, n_classes: usize) -> TrainingMatrix {
        let arity = rows[0].len();
        TrainingMatrix::new(
            rows,
            Targets::Classes {
                indices: classes,
                n_classes,
            },
            arity,
        )
    }

    fn probabilities(model: &dyn Model, row: &[f64]) -> Vec<f64> {
        match model.estimate(row) {
            Estimate::ClassProbabilities(p) => p,
            other => panic!("unexpected estimate {other:?}"),
        }
    }

    #[test]
    fn separates_gaussian_clusters() {
        let m = matrix(
            vec![
                vec![1.0, 10.0],
                vec![1.2, 11.0],
                vec![0.8, 9.0],
                vec![5.0, 1.0],
                vec![5.5, 1.5],
                vec![4.5, 0.5],
            ],
            vec![0, 0, 0, 1, 1, 1],
            2,
        );
        let model = NaiveBayes::default().fit_matrix(&m, &mut StdRng::seed_from_u64(0));

        let p = probabilities(model.as_ref(), &[1.1, 10.5]);
        assert!(p[0] > 0.99);
        let p = probabilities(model.as_ref(), &[5.1, 1.2]);
        assert!(p[1] > 0.99);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_features_do_not_produce_nan() {
        let m = matrix(
            vec![vec![1.0, 3.0], vec![1.0, 3.0], vec![2.0, 3.0]],
            vec![0, 0, 1],
            2,
        );
        let model = NaiveBayes::default().fit_matrix(&m, &mut StdRng::seed_from_u64(0));
        let p = probabilities(model.as_ref(), &[1.0, 3.0]);
        assert!(p.iter().all(|v| v.is_finite()));
        assert!(p[0] > p[1]);
        let p = probabilities(model.as_ref(), &[2.0, 3.0]);
        assert!(p[1] > p[0]);
    }

    #[test]
    fn priors_break_ties_between_identical_likelihoods() {
        let m = matrix(vec![vec![0.0], vec![0.0], vec![0.0]], vec![0, 0, 1], 2);
        let model = NaiveBayes::default().fit_matrix(&m, &mut StdRng::seed_from_u64(0));
        let p = probabilities(model.as_ref(), &[0.0]);
        assert!((p[0] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn smoothing_scales_the_pooled_variance() {
        // pooled feature 0: [0, 2, 4, 6] has population variance 5
        let m = matrix(
            vec![vec![0.0, 1.0], vec![2.0, 1.0], vec![4.0, 1.0], vec![6.0, 1.0]],
            vec![0, 0, 1, 1],
            2,
        );
        let model = NaiveBayes::new(0.1).fit_model(&m);
        assert!((model.smoothing() - 0.5).abs() < 1e-12);

        let model = NaiveBayes::new(0.0).fit_model(&m);
        assert_eq!(model.smoothing(), MIN_SMOOTHING);
    }

    #[test]
    fn softmax_handles_extreme_scores() {
        let p = softmax(&[-1000.0, -1001.0]);
        assert!(p[0] > p[1]);
        assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
        assert_eq!(softmax(&[f64::NEG_INFINITY, f64::NEG_INFINITY]), vec![0.5, 0.5]);
    }

    #[test]
    fn learner_metadata() {
        let nb = NaiveBayes::new(1e-6);
        assert_eq!(nb.name(), "naive-bayes");
        assert_eq!(nb.task(), TaskKind::Classification);
        assert!(!nb.is_randomized());
        assert_eq!(nb.var_smoothing(), 1e-6);
    }
}
