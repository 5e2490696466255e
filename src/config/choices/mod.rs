mod learner_choice;
mod schema;

pub use learner_choice::{
    ForestParameters, LearnerChoice, LearnerKind, NaiveBayesParameters, TreeParameters,
};
pub use schema::{FieldKind, FieldSpec, schema_for, specs_for_kind};

use schemars::Schema;
use serde_json::Value;

/// A configurable, serde-tagged choice: `{"type": kind, "params": {...}}`.
pub trait Choice: Sized {
    type Kind: Copy;

    fn schema() -> Schema;
    fn default_params(kind: Self::Kind) -> Value;
    fn from_parts(kind: Self::Kind, params: Value) -> anyhow::Result<Self>;
}
