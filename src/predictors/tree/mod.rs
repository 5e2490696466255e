mod builder;
mod decision_tree;
pub mod node;
pub mod split_criteria;
mod tree_params;

pub(crate) use decision_tree::grow_tree;
pub use decision_tree::{DecisionTree, DecisionTreeModel};
pub use node::{LeafValue, TreeNode};
pub use tree_params::{MaxFeatures, TreeParams};
