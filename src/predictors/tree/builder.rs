use crate::predictors::learner::TrainingMatrix;
use crate::predictors::tree::node::TreeNode;
use crate::predictors::tree::split_criteria::SplitCriterion;
use crate::predictors::tree::tree_params::TreeParams;
use rand::rngs::StdRng;
use rand::seq::index;

const MIN_IMPURITY_DECREASE: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    merit: f64,
}

/// Grows a CART tree top-down with the given criterion.
///
/// `samples` holds row indices into the matrix and may repeat rows (bootstrap
/// draws). It is reordered in place while the tree is grown.
pub(crate) struct TreeBuilder<'m, C: SplitCriterion> {
    matrix: &'m TrainingMatrix,
    criterion: C,
    params: TreeParams,
    n_candidates: usize,
}

impl<'m, C: SplitCriterion> TreeBuilder<'m, C> {
    pub(crate) fn new(matrix: &'m TrainingMatrix, criterion: C, params: TreeParams) -> Self {
        let n_candidates = params.max_features.resolve(matrix.arity());
        Self {
            matrix,
            criterion,
            params,
            n_candidates,
        }
    }

    pub(crate) fn build(&self, samples: &mut [usize], rng: &mut StdRng) -> TreeNode {
        self.grow(samples, 0, rng)
    }

    fn grow(&self, samples: &mut [usize], depth: usize, rng: &mut StdRng) -> TreeNode {
        let stats = self.criterion.stats_for(samples);
        let n = samples.len();

        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        if depth_reached
            || n < self.params.min_split()
            || n < 2 * self.params.min_leaf()
            || self.criterion.impurity(&stats) <= MIN_IMPURITY_DECREASE
        {
            return self.leaf(&stats, n);
        }

        let Some(split) = self.best_split(samples, &stats, rng) else {
            return self.leaf(&stats, n);
        };

        let mid = partition(samples, |s| {
            self.matrix.value(s, split.feature) <= split.threshold
        });
        if mid == 0 || mid == n {
            return self.leaf(&stats, n);
        }

        let (left, right) = samples.split_at_mut(mid);
        TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.grow(left, depth + 1, rng)),
            right: Box::new(self.grow(right, depth + 1, rng)),
        }
    }

    fn leaf(&self, stats: &C::Stats, n_samples: usize) -> TreeNode {
        TreeNode::Leaf {
            value: self.criterion.leaf_value(stats),
            n_samples,
        }
    }

    fn candidate_features(&self, rng: &mut StdRng) -> Vec<usize> {
        let arity = self.matrix.arity();
        if self.n_candidates >= arity {
            return (0..arity).collect();
        }
        let mut features = index::sample(rng, arity, self.n_candidates).into_vec();
        features.sort_unstable();
        features
    }

    /// Best threshold over the sampled features, or `None` when no split
    /// honours the leaf size and decreases impurity. When the sample holds
    /// no usable feature, the remaining features are searched too.
    fn best_split(
        &self,
        samples: &[usize],
        parent: &C::Stats,
        rng: &mut StdRng,
    ) -> Option<SplitCandidate> {
        let candidates = self.candidate_features(rng);
        let best = self.best_split_among(samples, parent, &candidates);
        if best.is_some() || candidates.len() >= self.matrix.arity() {
            return best;
        }
        let rest: Vec<usize> = (0..self.matrix.arity())
            .filter(|f| !candidates.contains(f))
            .collect();
        self.best_split_among(samples, parent, &rest)
    }

    fn best_split_among(
        &self,
        samples: &[usize],
        parent: &C::Stats,
        features: &[usize],
    ) -> Option<SplitCandidate> {
        let n = samples.len();
        let min_leaf = self.params.min_leaf();
        let mut sorted = samples.to_vec();
        let mut best: Option<SplitCandidate> = None;

        for &feature in features {
            sorted.sort_by(|&a, &b| {
                self.matrix
                    .value(a, feature)
                    .total_cmp(&self.matrix.value(b, feature))
            });

            let mut left = self.criterion.empty_stats();
            for i in 0..n - 1 {
                self.criterion.observe(&mut left, sorted[i]);

                let current = self.matrix.value(sorted[i], feature);
                let next = self.matrix.value(sorted[i + 1], feature);
                if next <= current {
                    continue;
                }
                let n_left = i + 1;
                if n_left < min_leaf || n - n_left < min_leaf {
                    continue;
                }

                let right = self.criterion.remainder(parent, &left);
                let merit = self.criterion.merit_of_split(parent, &left, &right);
                if merit <= MIN_IMPURITY_DECREASE || best.is_some_and(|b| merit <= b.merit) {
                    continue;
                }

                let mut threshold = current + (next - current) / 2.0;
                if threshold >= next {
                    threshold = current;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    merit,
                });
            }
        }
        best
    }
}

/// Moves every sample accepted by `goes_left` to the front and returns how
/// many there are.
fn partition(samples: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for i in 0..samples.len() {
        if goes_left(samples[i]) {
            samples.swap(mid, i);
            mid += 1;
        }
    }
    mid
}
