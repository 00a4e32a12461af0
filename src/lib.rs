//! `Powercast` - Household electricity usage forecasting
//!
//! This library turns point estimates from a previously trained usage model
//! into hourly, daily and household-adjusted monthly forecasts.

pub mod adjustment;
pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod models;
pub mod predictor;
pub mod report;
pub mod web;

// Re-export core types for public API
pub use adjustment::{AdjustmentRule, adjust};
pub use crate::config::PowercastConfig;
pub use error::PowercastError;
pub use forecast::{ForecastService, MonthlyForecast, MonthlyInput};
pub use models::{AdjustmentResult, Features, HeatingType, HomeSize, PredictionRequest};
pub use predictor::{LinearPredictor, PersistencePredictor, Predictor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PowercastError>;
