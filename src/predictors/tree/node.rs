use crate::predictors::learner::Estimate;

#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    /// Class probabilities of the training samples that reached the leaf.
    Distribution(Vec<f64>),
    Mean(f64),
}

impl LeafValue {
    pub fn to_estimate(&self) -> Estimate {
        match self {
            LeafValue::Distribution(p) => Estimate::ClassProbabilities(p.clone()),
            LeafValue::Mean(m) => Estimate::Value(*m),
        }
    }
}

/// Binary decision tree: samples with `row[feature] <= threshold` go left.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf {
        value: LeafValue,
        n_samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf_for(&self, row: &[f64]) -> &LeafValue {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { value, .. } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Number of split levels below this node; a lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}
