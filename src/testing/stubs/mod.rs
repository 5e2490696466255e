mod fixed_model;

pub use fixed_model::FixedModel;
