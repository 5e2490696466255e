mod gini_split_criterion;
mod split_criterion;
mod variance_split_criterion;

pub use gini_split_criterion::{ClassCounts, GiniSplitCriterion};
pub use split_criterion::SplitCriterion;
pub use variance_split_criterion::{Moments, VarianceSplitCriterion};
