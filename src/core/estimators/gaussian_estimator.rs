use std::f64::consts::PI;

/// Weighted running mean/variance of one feature (Welford's update).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GaussianEstimator {
    weight_sum: f64,
    mean: f64,
    variance_sum: f64,
}

impl GaussianEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-finite values and non-positive weights are ignored.
    #[inline]
    pub fn add_observation(&mut self, value: f64, weight: f64) {
        if !value.is_finite() || weight <= 0.0 {
            return;
        }

        if self.weight_sum > 0.0 {
            self.weight_sum += weight;
            let last_mean = self.mean;
            self.mean += weight * (value - last_mean) / self.weight_sum;
            self.variance_sum += weight * (value - last_mean) * (value - self.mean);
        } else {
            self.mean = value;
            self.weight_sum = weight;
        }
    }

    /// Folds another estimator's observations into this one.
    pub fn merge(&mut self, other: &GaussianEstimator) {
        if other.weight_sum <= 0.0 {
            return;
        }
        if self.weight_sum <= 0.0 {
            *self = other.clone();
            return;
        }
        let total = self.weight_sum + other.weight_sum;
        let delta = other.mean - self.mean;
        self.mean += delta * other.weight_sum / total;
        self.variance_sum +=
            other.variance_sum + delta * delta * self.weight_sum * other.weight_sum / total;
        self.weight_sum = total;
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn total_weight(&self) -> f64 {
        self.weight_sum
    }

    /// Maximum-likelihood (population) variance.
    pub fn variance(&self) -> f64 {
        if self.weight_sum > 0.0 {
            (self.variance_sum / self.weight_sum).max(0.0)
        } else {
            0.0
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Log of the normal density at `value` with the observed mean and
    /// `variance() + smoothing`.
    pub fn log_density(&self, value: f64, smoothing: f64) -> f64 {
        let var = self.variance() + smoothing;
        if var <= 0.0 {
            return if value == self.mean {
                0.0
            } else {
                f64::NEG_INFINITY
            };
        }
        let diff = value - self.mean;
        -0.5 * (2.0 * PI * var).ln() - diff * diff / (2.0 * var)
    }
}
