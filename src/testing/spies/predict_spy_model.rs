use crate::predictors::{Estimate, Model, TrainedModel};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

pub struct PredictSpyHandle(Arc<AtomicU64>);
impl PredictSpyHandle {
    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Forwards to the wrapped estimator and counts the rows it was asked about.
pub struct PredictSpyModel {
    count: Arc<AtomicU64>,
    inner: Box<dyn Model>,
}

impl PredictSpyModel {
    pub fn wrap(model: TrainedModel) -> (TrainedModel, PredictSpyHandle) {
        let counter = Arc::new(AtomicU64::new(0));
        let spied = model.map_inner(|inner| -> Box<dyn Model> {
            Box::new(PredictSpyModel {
                count: counter.clone(),
                inner,
            })
        });
        (spied, PredictSpyHandle(counter))
    }
}

impl Model for PredictSpyModel {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn estimate(&self, row: &[f64]) -> Estimate {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.inner.estimate(row)
    }
}
