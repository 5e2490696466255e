use crate::predictors::learner::{Estimate, Learner, Model, TaskKind, Targets, TrainingMatrix};
use crate::predictors::tree::builder::TreeBuilder;
use crate::predictors::tree::node::TreeNode;
use crate::predictors::tree::split_criteria::{GiniSplitCriterion, VarianceSplitCriterion};
use crate::predictors::tree::tree_params::{MaxFeatures, TreeParams};
use rand::rngs::StdRng;
use tracing::debug;

/// Grows one tree over `samples`, choosing the criterion from the targets.
pub(crate) fn grow_tree(
    matrix: &TrainingMatrix,
    params: TreeParams,
    samples: &mut [usize],
    rng: &mut StdRng,
) -> TreeNode {
    match matrix.targets() {
        Targets::Classes { indices, n_classes } => {
            TreeBuilder::new(matrix, GiniSplitCriterion::new(indices, *n_classes), params)
                .build(samples, rng)
        }
        Targets::Values(values) => {
            TreeBuilder::new(matrix, VarianceSplitCriterion::new(values), params)
                .build(samples, rng)
        }
    }
}

/// Single CART tree for either task.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    task: TaskKind,
    params: TreeParams,
    seed: Option<u64>,
}

impl DecisionTree {
    pub fn classifier(params: TreeParams) -> Self {
        Self {
            task: TaskKind::Classification,
            params,
            seed: None,
        }
    }

    pub fn regressor(params: TreeParams) -> Self {
        Self {
            task: TaskKind::Regression,
            params,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Learner for DecisionTree {
    fn name(&self) -> &'static str {
        match self.task {
            TaskKind::Classification => "decision-tree-classifier",
            TaskKind::Regression => "decision-tree-regressor",
        }
    }

    fn task(&self) -> TaskKind {
        self.task
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn is_randomized(&self) -> bool {
        self.params.max_features != MaxFeatures::All
    }

    fn fit_matrix(&self, matrix: &TrainingMatrix, rng: &mut StdRng) -> Box<dyn Model> {
        let mut samples: Vec<usize> = (0..matrix.n_samples()).collect();
        let root = grow_tree(matrix, self.params, &mut samples, rng);
        debug!(
            depth = root.depth(),
            leaves = root.n_leaves(),
            "decision tree grown"
        );
        Box::new(DecisionTreeModel {
            root,
            name: self.name(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct DecisionTreeModel {
    root: TreeNode,
    name: &'static str,
}

impl Model for DecisionTreeModel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn estimate(&self, row: &[f64]) -> Estimate {
        self.root.leaf_for(row).to_estimate()
    }
}
