use crate::predictors::learner::{Estimate, Learner, Model, TaskKind, Targets, TrainingMatrix};
use crate::predictors::tree::{LeafValue, MaxFeatures, TreeNode, TreeParams, grow_tree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Bagged CART trees. Each tree is grown from its own seed drawn from the
/// forest's RNG, so a forest seed fixes every tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    task: TaskKind,
    n_estimators: usize,
    bootstrap: bool,
    tree: TreeParams,
    seed: Option<u64>,
}

impl RandomForest {
    /// Classification forest; splits consider `sqrt(arity)` features.
    pub fn classifier(n_estimators: usize) -> Self {
        Self {
            task: TaskKind::Classification,
            n_estimators,
            bootstrap: true,
            tree: TreeParams::default().with_max_features(MaxFeatures::Sqrt),
            seed: None,
        }
    }

    /// Regression forest; splits consider every feature.
    pub fn regressor(n_estimators: usize) -> Self {
        Self {
            task: TaskKind::Regression,
            n_estimators,
            bootstrap: true,
            tree: TreeParams::default(),
            seed: None,
        }
    }

    pub fn with_tree_params(mut self, tree: TreeParams) -> Self {
        self.tree = tree;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators.max(1)
    }

    pub fn tree_params(&self) -> &TreeParams {
        &self.tree
    }

    fn draw_samples(&self, n: usize, rng: &mut StdRng) -> Vec<usize> {
        if self.bootstrap {
            (0..n).map(|_| rng.random_range(0..n)).collect()
        } else {
            (0..n).collect()
        }
    }
}

impl Learner for RandomForest {
    fn name(&self) -> &'static str {
        match self.task {
            TaskKind::Classification => "random-forest-classifier",
            TaskKind::Regression => "random-forest-regressor",
        }
    }

    fn task(&self) -> TaskKind {
        self.task
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn fit_matrix(&self, matrix: &TrainingMatrix, rng: &mut StdRng) -> Box<dyn Model> {
        let n = matrix.n_samples();
        let trees: Vec<TreeNode> = (0..self.n_estimators())
            .map(|_| {
                let mut tree_rng = StdRng::seed_from_u64(rng.random());
                let mut samples = self.draw_samples(n, &mut tree_rng);
                grow_tree(matrix, self.tree, &mut samples, &mut tree_rng)
            })
            .collect();

        debug!(
            trees = trees.len(),
            max_depth = trees.iter().map(TreeNode::depth).max().unwrap_or(0),
            "random forest grown"
        );

        let n_classes = match matrix.targets() {
            Targets::Classes { n_classes, .. } => Some(*n_classes),
            Targets::Values(_) => None,
        };
        Box::new(RandomForestModel {
            trees,
            n_classes,
            name: self.name(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RandomForestModel {
    trees: Vec<TreeNode>,
    /// `None` for a regression forest.
    n_classes: Option<usize>,
    name: &'static str,
}

impl RandomForestModel {
    fn mean_distribution(&self, row: &[f64], n_classes: usize) -> Vec<f64> {
        let mut votes = vec![0.0; n_classes];
        for tree in &self.trees {
            if let LeafValue::Distribution(p) = tree.leaf_for(row) {
                for (v, p) in votes.iter_mut().zip(p) {
                    *v += p;
                }
            }
        }
        let n_trees = self.trees.len() as f64;
        votes.iter_mut().for_each(|v| *v /= n_trees);
        votes
    }

    fn mean_value(&self, row: &[f64]) -> f64 {
        let sum: f64 = self
            .trees
            .iter()
            .filter_map(|tree| match tree.leaf_for(row) {
                LeafValue::Mean(m) => Some(*m),
                LeafValue::Distribution(_) => None,
            })
            .sum();
        sum / self.trees.len() as f64
    }
}

impl Model for RandomForestModel {
    fn name(&self) -> &'static str {
        self.name
    }

    fn estimate(&self, row: &[f64]) -> Estimate {
        match self.n_classes {
            Some(k) => Estimate::ClassProbabilities(self.mean_distribution(row, k)),
            None => Estimate::Value(self.mean_value(row)),
        }
    }
}
