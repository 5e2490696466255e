mod crop_recommendation;
mod pipeline;
mod price_forecast;

pub use crop_recommendation::{
    CROP_FEATURES, CropRecommender, crop_schema, default_crop_learner,
};
pub use pipeline::PredictionPipeline;
pub use price_forecast::{
    ANNUAL_RAINFALL, COMMODITY_BASE_PRICES, CommodityForecaster, MonthYear, PRICE_FEATURES,
    base_price, commodities, default_price_learner, price_schema,
};
