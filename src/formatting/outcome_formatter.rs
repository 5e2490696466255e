use crate::error::{PipelineError, Result};
use crate::predictors::{Outcome, PredictionResult};

pub const DEFAULT_DECIMALS: usize = 2;

/// Renders a [`PredictionResult`] as display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeFormatter {
    /// Written before the outcome as `"{caption}: "`.
    pub caption: Option<String>,
    /// Written directly before the value, e.g. a currency sign.
    pub prefix: Option<String>,
    pub decimals: usize,
    pub show_confidence: bool,
}

impl Default for OutcomeFormatter {
    fn default() -> Self {
        Self {
            caption: None,
            prefix: None,
            decimals: DEFAULT_DECIMALS,
            show_confidence: true,
        }
    }
}

impl OutcomeFormatter {
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_confidence(mut self, show: bool) -> Self {
        self.show_confidence = show;
        self
    }

    pub fn format(&self, result: &PredictionResult) -> Result<String> {
        let invalid = |reason: String| Err(PipelineError::InvalidOutcome { reason });

        if let Some(score) = result.score
            && !(0.0..=1.0).contains(&score)
        {
            return invalid(format!("score {score} is outside [0, 1]"));
        }

        let mut body = match &result.outcome {
            Outcome::Label(label) if label.trim().is_empty() => {
                return invalid("empty label".to_string());
            }
            Outcome::Label(label) => label.clone(),
            Outcome::Value(value) if !value.is_finite() => {
                return invalid(format!("value {value} is not finite"));
            }
            Outcome::Value(value) => format!("{value:.prec$}", prec = self.decimals),
        };
        if let Some(prefix) = &self.prefix {
            body.insert_str(0, prefix);
        }
        if self.show_confidence
            && let Some(score) = result.score
        {
            body.push_str(&format!(" (confidence {:.1}%)", score * 100.0));
        }

        Ok(match &self.caption {
            Some(caption) => format!("{caption}: {body}"),
            None => body,
        })
    }
}

/// Formats with the default settings: two decimals, confidence shown.
pub fn format(result: &PredictionResult) -> Result<String> {
    OutcomeFormatter::default().format(result)
}
