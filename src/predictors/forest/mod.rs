mod random_forest;

pub use random_forest::{RandomForest, RandomForestModel};
