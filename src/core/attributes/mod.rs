mod feature_field;
mod label_domain;

pub use feature_field::{FeatureField, ValueRange};
pub use label_domain::LabelDomain;
