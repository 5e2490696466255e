use crate::core::{FeatureSchema, FeatureVector};
use crate::error::{PipelineError, Result};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Anything that can answer "what value did the user enter for `name`?".
pub trait InputSource {
    fn value_of(&self, name: &str) -> Option<f64>;
}

impl<S: BuildHasher> InputSource for HashMap<String, f64, S> {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> InputSource for HashMap<&str, f64, S> {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl InputSource for BTreeMap<String, f64> {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl InputSource for [(&str, f64)] {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> InputSource for [(&str, f64); N] {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.as_slice().value_of(name)
    }
}

/// Builds the model input from named values, in schema order.
///
/// Fields are checked in schema order, so the first offending field is the
/// one reported. Names the schema does not know are ignored.
pub fn extract<I>(named_inputs: &I, schema: &FeatureSchema) -> Result<FeatureVector>
where
    I: InputSource + ?Sized,
{
    let mut values = Vec::with_capacity(schema.arity());
    for field in schema.fields() {
        let Some(value) = named_inputs.value_of(&field.name) else {
            return Err(PipelineError::MissingFeature {
                name: field.name.clone(),
            });
        };
        if !value.is_finite() {
            return Err(PipelineError::NonFiniteValue {
                name: format!("feature '{}'", field.name),
            });
        }
        if let Some(range) = field.range
            && !range.contains(value)
        {
            return Err(PipelineError::OutOfRange {
                name: field.name.clone(),
                value,
                min: range.min,
                max: range.max,
            });
        }
        values.push(value);
    }
    Ok(FeatureVector::new(values))
}
