mod predict_spy_model;

pub use predict_spy_model::{PredictSpyHandle, PredictSpyModel};
