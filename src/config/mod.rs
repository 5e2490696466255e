pub mod choices;
mod overrides;

pub use overrides::{
    KeyValue, apply_overrides, build_choice, learner_from_args, parse_key_value, parse_kind,
};
