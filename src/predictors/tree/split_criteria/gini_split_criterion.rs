use crate::predictors::tree::node::LeafValue;
use crate::predictors::tree::split_criteria::split_criterion::SplitCriterion;

#[derive(Clone, Debug, PartialEq)]
pub struct ClassCounts {
    counts: Vec<f64>,
    total: f64,
}

impl ClassCounts {
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }
}

/// Gini impurity over class indices, for classification trees.
pub struct GiniSplitCriterion<'a> {
    classes: &'a [usize],
    n_classes: usize,
}

impl<'a> GiniSplitCriterion<'a> {
    pub fn new(classes: &'a [usize], n_classes: usize) -> Self {
        Self { classes, n_classes }
    }

    pub fn compute_gini(distribution: &[f64], distribution_sum_of_weights: f64) -> f64 {
        if distribution_sum_of_weights <= 0.0 {
            return 0.0;
        }
        let mut gini = 1.0;
        for &weight in distribution {
            let rel_freq = weight / distribution_sum_of_weights;
            gini -= rel_freq * rel_freq;
        }
        gini
    }
}

impl SplitCriterion for GiniSplitCriterion<'_> {
    type Stats = ClassCounts;

    fn empty_stats(&self) -> ClassCounts {
        ClassCounts {
            counts: vec![0.0; self.n_classes],
            total: 0.0,
        }
    }

    #[inline]
    fn observe(&self, stats: &mut ClassCounts, sample: usize) {
        stats.counts[self.classes[sample]] += 1.0;
        stats.total += 1.0;
    }

    fn remainder(&self, total: &ClassCounts, part: &ClassCounts) -> ClassCounts {
        ClassCounts {
            counts: total
                .counts
                .iter()
                .zip(&part.counts)
                .map(|(t, p)| t - p)
                .collect(),
            total: total.total - part.total,
        }
    }

    fn weight(&self, stats: &ClassCounts) -> f64 {
        stats.total
    }

    fn impurity(&self, stats: &ClassCounts) -> f64 {
        Self::compute_gini(&stats.counts, stats.total)
    }

    fn leaf_value(&self, stats: &ClassCounts) -> LeafValue {
        let probabilities = if stats.total > 0.0 {
            stats.counts.iter().map(|c| c / stats.total).collect()
        } else {
            vec![0.0; self.n_classes]
        };
        LeafValue::Distribution(probabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn pure_node_has_zero_gini() {
        assert!(GiniSplitCriterion::compute_gini(&[4.0, 0.0], 4.0).abs() < EPS);
    }

    #[test]
    fn balanced_binary_node_has_half_gini() {
        assert!((GiniSplitCriterion::compute_gini(&[2.0, 2.0], 4.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn empty_distribution_is_pure() {
        assert_eq!(GiniSplitCriterion::compute_gini(&[0.0, 0.0], 0.0), 0.0);
    }

    #[test]
    fn perfect_split_recovers_all_impurity() {
        let classes = [0, 0, 1, 1];
        let c = GiniSplitCriterion::new(&classes, 2);
        let parent = c.stats_for(&[0, 1, 2, 3]);
        let left = c.stats_for(&[0, 1]);
        let right = c.remainder(&parent, &left);

        assert_eq!(right.counts(), &[0.0, 2.0]);
        assert!((c.merit_of_split(&parent, &left, &right) - 0.5).abs() < EPS);
    }

    #[test]
    fn useless_split_has_no_merit() {
        let classes = [0, 1, 0, 1];
        let c = GiniSplitCriterion::new(&classes, 2);
        let parent = c.stats_for(&[0, 1, 2, 3]);
        let left = c.stats_for(&[0, 1]);
        let right = c.remainder(&parent, &left);
        assert!(c.merit_of_split(&parent, &left, &right).abs() < EPS);
    }

    #[test]
    fn leaf_value_is_class_distribution() {
        let classes = [0, 1, 1, 2];
        let c = GiniSplitCriterion::new(&classes, 3);
        let stats = c.stats_for(&[0, 1, 2, 3]);
        assert_eq!(
            c.leaf_value(&stats),
            LeafValue::Distribution(vec![0.25, 0.5, 0.25])
        );
    }

    #[test]
    fn duplicated_samples_count_twice() {
        let classes = [0, 1];
        let c = GiniSplitCriterion::new(&classes, 2);
        let stats = c.stats_for(&[1, 1, 0]);
        assert_eq!(stats.counts(), &[1.0, 2.0]);
    }
}
