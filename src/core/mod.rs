pub mod attributes;
pub mod estimators;
mod feature_schema;
mod feature_vector;
mod table;
mod training_sample;

pub use feature_schema::FeatureSchema;
pub use feature_vector::FeatureVector;
pub use table::samples_from_table;
pub use training_sample::{Target, TrainingSample};
