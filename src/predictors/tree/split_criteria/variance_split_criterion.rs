use crate::predictors::tree::node::LeafValue;
use crate::predictors::tree::split_criteria::split_criterion::SplitCriterion;

/// Weighted first and second moments of regression targets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    weight: f64,
    sum: f64,
    sum_sq: f64,
}

impl Moments {
    pub fn mean(&self) -> f64 {
        if self.weight > 0.0 {
            self.sum / self.weight
        } else {
            0.0
        }
    }
}

/// Variance (mean squared error) reduction, for regression trees.
pub struct VarianceSplitCriterion<'a> {
    values: &'a [f64],
}

impl<'a> VarianceSplitCriterion<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self { values }
    }
}

impl SplitCriterion for VarianceSplitCriterion<'_> {
    type Stats = Moments;

    fn empty_stats(&self) -> Moments {
        Moments::default()
    }

    #[inline]
    fn observe(&self, stats: &mut Moments, sample: usize) {
        let y = self.values[sample];
        stats.weight += 1.0;
        stats.sum += y;
        stats.sum_sq += y * y;
    }

    fn remainder(&self, total: &Moments, part: &Moments) -> Moments {
        Moments {
            weight: total.weight - part.weight,
            sum: total.sum - part.sum,
            sum_sq: total.sum_sq - part.sum_sq,
        }
    }

    fn weight(&self, stats: &Moments) -> f64 {
        stats.weight
    }

    fn impurity(&self, stats: &Moments) -> f64 {
        if stats.weight <= 0.0 {
            return 0.0;
        }
        let mean = stats.sum / stats.weight;
        (stats.sum_sq / stats.weight - mean * mean).max(0.0)
    }

    fn leaf_value(&self, stats: &Moments) -> LeafValue {
        LeafValue::Mean(stats.mean())
    }
}
