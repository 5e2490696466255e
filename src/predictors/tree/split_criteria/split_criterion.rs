use crate::predictors::tree::node::LeafValue;

/// Scores candidate splits of a node's samples.
///
/// `Stats` is a summary of the targets of a set of samples that can be built
/// incrementally while sweeping a sorted feature, and whose complement is
/// cheap to derive from the parent's summary.
pub trait SplitCriterion {
    type Stats: Clone;

    fn empty_stats(&self) -> Self::Stats;
    fn observe(&self, stats: &mut Self::Stats, sample: usize);
    fn remainder(&self, total: &Self::Stats, part: &Self::Stats) -> Self::Stats;
    fn weight(&self, stats: &Self::Stats) -> f64;
    fn impurity(&self, stats: &Self::Stats) -> f64;
    fn leaf_value(&self, stats: &Self::Stats) -> LeafValue;

    fn stats_for(&self, samples: &[usize]) -> Self::Stats {
        let mut stats = self.empty_stats();
        for &s in samples {
            self.observe(&mut stats, s);
        }
        stats
    }

    /// Impurity decrease of splitting `parent` into `left` and `right`.
    fn merit_of_split(&self, parent: &Self::Stats, left: &Self::Stats, right: &Self::Stats) -> f64 {
        let total = self.weight(parent);
        if total <= 0.0 {
            return 0.0;
        }
        let children = (self.weight(left) * self.impurity(left)
            + self.weight(right) * self.impurity(right))
            / total;
        self.impurity(parent) - children
    }
}
