use crate::config::choices::{ForestParameters, LearnerChoice};
use crate::core::attributes::FeatureField;
use crate::core::{FeatureSchema, TrainingSample};
use crate::error::Result;
use crate::extraction::InputSource;
use crate::formatting::OutcomeFormatter;
use crate::predictors::{PredictionResult, TrainedModel, fit};
use crate::tasks::pipeline::PredictionPipeline;
use std::sync::Arc;

/// Soil and weather inputs in model order, with the accepted ranges.
pub const CROP_FEATURES: [(&str, f64, f64); 7] = [
    ("N", 0.0, 200.0),
    ("P", 0.0, 200.0),
    ("K", 0.0, 200.0),
    ("temperature", 0.0, 60.0),
    ("humidity", 0.0, 100.0),
    ("ph", 0.0, 14.0),
    ("rainfall", 0.0, 500.0),
];

pub fn crop_schema() -> Result<FeatureSchema> {
    FeatureSchema::new(
        CROP_FEATURES
            .iter()
            .map(|&(name, min, max)| FeatureField::with_range(name, min, max))
            .collect(),
    )
}

/// Random forest of 50 trees seeded with 10.
pub fn default_crop_learner() -> LearnerChoice {
    LearnerChoice::RandomForestClassifier(ForestParameters {
        n_estimators: 50,
        seed: Some(10),
        ..ForestParameters::default()
    })
}

/// Recommends a crop for soil nutrients and weather readings.
#[derive(Debug, Clone)]
pub struct CropRecommender {
    pipeline: PredictionPipeline,
}

impl CropRecommender {
    /// Fits the default forest on labelled crop rows.
    pub fn fit(samples: &[TrainingSample]) -> Result<Self> {
        Self::fit_with(samples, &default_crop_learner())
    }

    pub fn fit_with(samples: &[TrainingSample], learner: &LearnerChoice) -> Result<Self> {
        Self::from_model(Arc::new(fit(samples, learner)?))
    }

    pub fn from_model(model: Arc<TrainedModel>) -> Result<Self> {
        let formatter = OutcomeFormatter::default()
            .with_caption("Recommended Crop")
            .with_confidence(false);
        Ok(Self {
            pipeline: PredictionPipeline::new(crop_schema()?, model, formatter)?,
        })
    }

    pub fn model(&self) -> &Arc<TrainedModel> {
        self.pipeline.model()
    }

    pub fn recommend<I: InputSource + ?Sized>(&self, inputs: &I) -> Result<PredictionResult> {
        self.pipeline.predict(inputs)
    }

    /// `"Recommended Crop: rice"`
    pub fn render<I: InputSource + ?Sized>(&self, inputs: &I) -> Result<String> {
        self.pipeline.render(inputs)
    }
}
