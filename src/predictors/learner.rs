use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskKind {
    Classification,
    Regression,
}

/// Raw output of a fitted model for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    /// One non-negative weight per class index; not necessarily normalised.
    ClassProbabilities(Vec<f64>),
    Value(f64),
}

/// Training targets after validation, aligned with the matrix rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Targets {
    Classes { indices: Vec<usize>, n_classes: usize },
    Values(Vec<f64>),
}

/// Validated, row-major training data handed to a [`Learner`].
#[derive(Debug, Clone)]
pub struct TrainingMatrix {
    rows: Vec<Vec<f64>>,
    targets: Targets,
    arity: usize,
}

impl TrainingMatrix {
    /// Callers guarantee every row has `arity` finite values and that
    /// `targets` has one entry per row.
    pub(crate) fn new(rows: Vec<Vec<f64>>, targets: Targets, arity: usize) -> TrainingMatrix {
        TrainingMatrix {
            rows,
            targets,
            arity,
        }
    }

    pub fn n_samples(&self) -> usize {
        self.rows.len()
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }

    #[inline]
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.rows[row][feature]
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn task(&self) -> TaskKind {
        match self.targets {
            Targets::Classes { .. } => TaskKind::Classification,
            Targets::Values(_) => TaskKind::Regression,
        }
    }
}

/// A configured learning algorithm, ready to fit.
pub trait Learner {
    fn name(&self) -> &'static str;
    fn task(&self) -> TaskKind;
    /// Seed from the configuration; `None` means "draw one at fit time".
    fn seed(&self) -> Option<u64>;
    /// Whether fitting draws from the RNG at all.
    fn is_randomized(&self) -> bool {
        true
    }
    fn fit_matrix(&self, matrix: &TrainingMatrix, rng: &mut StdRng) -> Box<dyn Model>;
}

/// A fitted model. Implementations hold no interior mutability, so a shared
/// reference can serve any number of threads.
pub trait Model: Send + Sync {
    fn name(&self) -> &'static str;
    fn estimate(&self, row: &[f64]) -> Estimate;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn task_kind_names() {
        assert_eq!(TaskKind::Classification.to_string(), "classification");
        assert_eq!(TaskKind::from_str("regression").unwrap(), TaskKind::Regression);
        let s: &'static str = TaskKind::Regression.into();
        assert_eq!(s, "regression");
    }

    #[test]
    fn matrix_reports_task_from_targets() {
        let m = TrainingMatrix::new(
            vec![vec![1.0], vec![2.0]],
            Targets::Classes {
                indices: vec![0, 1],
                n_classes: 2,
            },
            1,
        );
        assert_eq!(m.task(), TaskKind::Classification);
        assert_eq!(m.n_samples(), 2);
        assert_eq!(m.value(1, 0), 2.0);

        let m = TrainingMatrix::new(vec![vec![1.0]], Targets::Values(vec![3.0]), 1);
        assert_eq!(m.task(), TaskKind::Regression);
    }
}
