mod outcome_formatter;

pub use outcome_formatter::{DEFAULT_DECIMALS, OutcomeFormatter, format};
