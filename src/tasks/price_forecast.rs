use crate::config::choices::{LearnerChoice, TreeParameters};
use crate::core::attributes::FeatureField;
use crate::core::{FeatureSchema, TrainingSample};
use crate::error::{PipelineError, Result};
use crate::formatting::OutcomeFormatter;
use crate::predictors::{PredictionResult, TrainedModel, fit};
use crate::tasks::pipeline::PredictionPipeline;
use chrono::{Datelike, Local};
use std::fmt;
use std::sync::Arc;

/// Base market price per commodity, ₹ per quintal.
pub const COMMODITY_BASE_PRICES: [(&str, f64); 23] = [
    ("Paddy", 1245.5),
    ("Arhar", 3200.0),
    ("Bajra", 1175.0),
    ("Barley", 980.0),
    ("Copra", 5100.0),
    ("Cotton", 3600.0),
    ("Sesamum", 4200.0),
    ("Gram", 2800.0),
    ("Groundnut", 3700.0),
    ("Jowar", 1520.0),
    ("Maize", 1175.0),
    ("Masoor", 2800.0),
    ("Moong", 3500.0),
    ("Niger", 3500.0),
    ("Ragi", 1500.0),
    ("Rape", 2500.0),
    ("Jute", 1675.0),
    ("Safflower", 2500.0),
    ("Soyabean", 2200.0),
    ("Sugarcane", 2250.0),
    ("Sunflower", 3700.0),
    ("Urad", 4300.0),
    ("Wheat", 1350.0),
];

/// Average rainfall in mm for each month, January first.
pub const ANNUAL_RAINFALL: [f64; 12] = [
    29.0, 21.0, 37.5, 30.7, 52.6, 150.0, 299.0, 251.7, 179.2, 70.5, 39.8, 10.9,
];

pub const PRICE_FEATURES: [(&str, f64, f64); 3] = [
    ("month", 1.0, 12.0),
    ("year", 1900.0, 2100.0),
    ("rainfall", 0.0, 5000.0),
];

/// Canonical name and base price of a commodity, matched case-insensitively.
pub fn base_price(name: &str) -> Result<(&'static str, f64)> {
    let wanted = name.trim();
    COMMODITY_BASE_PRICES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| PipelineError::UnknownCommodity {
            name: name.to_string(),
        })
}

pub fn commodities() -> impl Iterator<Item = &'static str> {
    COMMODITY_BASE_PRICES.iter().map(|(name, _)| *name)
}

pub fn price_schema() -> Result<FeatureSchema> {
    FeatureSchema::new(
        PRICE_FEATURES
            .iter()
            .map(|&(name, min, max)| FeatureField::with_range(name, min, max))
            .collect(),
    )
}

/// Regression tree limited to depth 12, seeded with 0.
pub fn default_price_learner() -> LearnerChoice {
    LearnerChoice::DecisionTreeRegressor(TreeParameters {
        max_depth: Some(12),
        seed: Some(0),
        ..TreeParameters::default()
    })
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PipelineError::InvalidMonth { month });
        }
        Ok(Self { year, month })
    }

    /// The current month on the local clock.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// `months` later, rolling the year over after December.
    pub fn plus(&self, months: u32) -> Result<Self> {
        let index = i64::from(self.month - 1) + i64::from(months);
        let year = i32::try_from(i64::from(self.year) + index / 12).map_err(|_| {
            PipelineError::DateOverflow {
                start: self.to_string(),
                months,
            }
        })?;
        Ok(Self {
            year,
            month: (index % 12) as u32 + 1,
        })
    }

    pub fn next(&self) -> Result<Self> {
        self.plus(1)
    }

    pub fn rainfall(&self) -> f64 {
        ANNUAL_RAINFALL[(self.month - 1) as usize]
    }

    /// Model inputs: month, year and the month's average rainfall.
    pub fn features(&self) -> [(&'static str, f64); 3] {
        [
            ("month", self.month as f64),
            ("year", self.year as f64),
            ("rainfall", self.rainfall()),
        ]
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Forecasts the market price of one commodity from its wholesale price
/// index.
#[derive(Debug, Clone)]
pub struct CommodityForecaster {
    commodity: &'static str,
    base_price: f64,
    pipeline: PredictionPipeline,
}

impl CommodityForecaster {
    /// Fits the default regression tree on `month, year, rainfall -> WPI` rows.
    pub fn fit(commodity: &str, samples: &[TrainingSample]) -> Result<Self> {
        Self::fit_with(commodity, samples, &default_price_learner())
    }

    pub fn fit_with(
        commodity: &str,
        samples: &[TrainingSample],
        learner: &LearnerChoice,
    ) -> Result<Self> {
        base_price(commodity)?;
        Self::from_model(commodity, Arc::new(fit(samples, learner)?))
    }

    pub fn from_model(commodity: &str, model: Arc<TrainedModel>) -> Result<Self> {
        let (commodity, base_price) = base_price(commodity)?;
        let formatter = OutcomeFormatter::default()
            .with_prefix("₹ ")
            .with_confidence(false);
        Ok(Self {
            commodity,
            base_price,
            pipeline: PredictionPipeline::new(price_schema()?, model, formatter)?,
        })
    }

    pub fn commodity(&self) -> &'static str {
        self.commodity
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn model(&self) -> &Arc<TrainedModel> {
        self.pipeline.model()
    }

    pub fn wholesale_index(&self, at: MonthYear) -> Result<f64> {
        let result = self.pipeline.predict(&at.features())?;
        result
            .as_value()
            .ok_or_else(|| PipelineError::InvalidOutcome {
                reason: format!("{} did not predict a price index", self.model().learner()),
            })
    }

    /// Price in ₹ per quintal, rounded to paise.
    pub fn price(&self, at: MonthYear) -> Result<f64> {
        Ok(round2(self.wholesale_index(at)? * self.base_price / 100.0))
    }

    /// Prices for the `horizon` months after `start`.
    pub fn forecast(&self, start: MonthYear, horizon: u32) -> Result<Vec<(MonthYear, f64)>> {
        let months = (1..=horizon)
            .map(|i| start.plus(i))
            .collect::<Result<Vec<_>>>()?;
        months
            .into_iter()
            .map(|at| Ok((at, self.price(at)?)))
            .collect()
    }

    /// `"₹ 1234.57"`
    pub fn render_price(&self, at: MonthYear) -> Result<String> {
        self.pipeline
            .formatter()
            .format(&PredictionResult::value(self.price(at)?))
    }
}
