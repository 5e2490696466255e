use crate::core::attributes::FeatureField;
use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Ordered list of the features a model consumes.
///
/// The order is the column order the model was fitted with; names are unique.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FeatureField>", into = "Vec<FeatureField>")]
pub struct FeatureSchema {
    fields: Vec<FeatureField>,
}

impl FeatureSchema {
    pub fn new(fields: Vec<FeatureField>) -> Result<FeatureSchema> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(PipelineError::InvalidSchema {
                    reason: "feature names must not be empty".into(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(PipelineError::InvalidSchema {
                    reason: format!("duplicate feature '{}'", field.name),
                });
            }
            if let Some(range) = field.range
                && !range.is_valid()
            {
                return Err(PipelineError::InvalidSchema {
                    reason: format!(
                        "feature '{}' has invalid range [{}, {}]",
                        field.name, range.min, range.max
                    ),
                });
            }
        }
        Ok(FeatureSchema { fields })
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<FeatureSchema> {
        FeatureSchema::new(
            names
                .iter()
                .map(|n| FeatureField::new(n.as_ref()))
                .collect(),
        )
    }

    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FeatureField] {
        &self.fields
    }

    pub fn field_at_index(&self, index: usize) -> Option<&FeatureField> {
        self.fields.get(index)
    }

    pub fn index_of_feature(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl TryFrom<Vec<FeatureField>> for FeatureSchema {
    type Error = PipelineError;

    fn try_from(fields: Vec<FeatureField>) -> Result<Self> {
        FeatureSchema::new(fields)
    }
}

impl From<FeatureSchema> for Vec<FeatureField> {
    fn from(schema: FeatureSchema) -> Self {
        schema.fields
    }
}

impl fmt::Debug for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declared_order() {
        let s = FeatureSchema::from_names(&["N", "P", "K"]).unwrap();
        assert_eq!(s.arity(), 3);
        assert_eq!(s.names().collect::<Vec<_>>(), ["N", "P", "K"]);
        assert_eq!(s.index_of_feature("K"), Some(2));
        assert_eq!(s.index_of_feature("ph"), None);
        assert_eq!(s.field_at_index(1).map(FeatureField::name), Some("P"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = FeatureSchema::from_names(&["N", "N"]).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidSchema { .. }));
    }

    #[test]
    fn rejects_blank_names_and_bad_ranges() {
        assert!(FeatureSchema::from_names(&[" "]).is_err());
        let err = FeatureSchema::new(vec![FeatureField::with_range("ph", 14.0, 0.0)]).unwrap_err();
        assert!(err.to_string().contains("invalid range"));
    }

    #[test]
    fn deserializes_through_validation() {
        let s: FeatureSchema = serde_json::from_str(
            r#"[{"name":"month","range":{"min":1.0,"max":12.0}},{"name":"year"}]"#,
        )
        .unwrap();
        assert_eq!(s.arity(), 2);
        assert!(s.fields()[0].range.is_some());

        let dup = serde_json::from_str::<FeatureSchema>(r#"[{"name":"a"},{"name":"a"}]"#);
        assert!(dup.is_err());
    }

    #[test]
    fn debug_lists_names_only() {
        let s = FeatureSchema::from_names(&["a", "b"]).unwrap();
        assert_eq!(format!("{s:?}"), r#"["a", "b"]"#);
    }
}
