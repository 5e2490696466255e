use crate::core::FeatureSchema;
use crate::error::{PipelineError, Result};
use crate::extraction::{InputSource, extract};
use crate::formatting::OutcomeFormatter;
use crate::predictors::{PredictionResult, TrainedModel};
use std::sync::Arc;
use tracing::info;

/// extract -> predict -> format for one request, over a shared model.
#[derive(Debug, Clone)]
pub struct PredictionPipeline {
    schema: FeatureSchema,
    model: Arc<TrainedModel>,
    formatter: OutcomeFormatter,
}

impl PredictionPipeline {
    pub fn new(
        schema: FeatureSchema,
        model: Arc<TrainedModel>,
        formatter: OutcomeFormatter,
    ) -> Result<Self> {
        if schema.arity() != model.arity() {
            return Err(PipelineError::ArityMismatch {
                expected: model.arity(),
                found: schema.arity(),
            });
        }
        info!(
            learner = model.learner(),
            features = ?schema.names().collect::<Vec<_>>(),
            "pipeline ready"
        );
        Ok(Self {
            schema,
            model,
            formatter,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn model(&self) -> &Arc<TrainedModel> {
        &self.model
    }

    pub fn formatter(&self) -> &OutcomeFormatter {
        &self.formatter
    }

    /// A failed extraction never reaches the model.
    pub fn predict<I: InputSource + ?Sized>(&self, inputs: &I) -> Result<PredictionResult> {
        let vector = extract(inputs, &self.schema)?;
        self.model.predict(&vector)
    }

    pub fn render<I: InputSource + ?Sized>(&self, inputs: &I) -> Result<String> {
        self.formatter.format(&self.predict(inputs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrainingSample;
    use crate::core::attributes::FeatureField;
    use crate::predictors::fit_with;
    use crate::predictors::tree::{DecisionTree, TreeParams};
    use crate::testing::spies::PredictSpyModel;
    use crate::testing::stubs::FixedModel;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            FeatureField::with_range("x", 0.0, 10.0),
            FeatureField::new("y"),
        ])
        .unwrap()
    }

    #[test]
    fn schema_and_model_arity_must_agree() {
        let model = Arc::new(FixedModel::label(3, "rice"));
        let err = PredictionPipeline::new(schema(), model, OutcomeFormatter::default()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::ArityMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn renders_through_the_formatter() {
        let samples = vec![
            TrainingSample::labelled(vec![1.0, 0.0], "low"),
            TrainingSample::labelled(vec![9.0, 0.0], "high"),
        ];
        let learner = DecisionTree::classifier(TreeParams::default());
        let model = Arc::new(fit_with(&samples, &learner).unwrap());
        let formatter = OutcomeFormatter::default()
            .with_caption("Level")
            .with_confidence(false);
        let pipeline = PredictionPipeline::new(schema(), model, formatter).unwrap();

        assert_eq!(
            pipeline.render(&[("x", 8.5), ("y", 1.0)]).unwrap(),
            "Level: high"
        );
        assert_eq!(
            pipeline.predict(&[("y", 0.0), ("x", 0.5)]).unwrap().as_label(),
            Some("low")
        );
    }

    #[test]
    fn failed_extraction_never_reaches_the_model() {
        let (model, calls) = PredictSpyModel::wrap(FixedModel::label(2, "rice"));
        let pipeline =
            PredictionPipeline::new(schema(), Arc::new(model), OutcomeFormatter::default())
                .unwrap();

        assert!(matches!(
            pipeline.predict(&[("x", 11.0), ("y", 0.0)]),
            Err(PipelineError::OutOfRange { .. })
        ));
        assert!(matches!(
            pipeline.predict(&[("x", 1.0)]),
            Err(PipelineError::MissingFeature { .. })
        ));
        assert_eq!(calls.count(), 0);

        pipeline.predict(&[("x", 1.0), ("y", 2.0)]).unwrap();
        assert_eq!(calls.count(), 1);
    }
}
