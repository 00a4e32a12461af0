//! Monthly adjustment request and result records

use serde::{Deserialize, Serialize};

use super::{HeatingType, HomeSize};
use crate::adjustment::AdjustmentRule;

/// Everything the adjustment engine needs for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub target_year: i32,
    /// Calendar month (1-12)
    pub target_month: u32,
    /// Model output, average usage per day
    pub base_prediction: f64,
    pub household_size: u8,
    pub home_size: HomeSize,
    pub heating_type: HeatingType,
    /// Expected average temperature for the month in °C
    pub average_temperature_c: i32,
}

/// One rule's contribution to the adjustment factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    pub rule: AdjustmentRule,
    pub multiplier: f64,
}

/// Adjusted monthly usage and the averages derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentResult {
    pub days_in_month: u32,
    /// Base prediction scaled to the whole month
    pub monthly_base: f64,
    /// Product of all rule multipliers
    pub adjustment_factor: f64,
    pub adjusted_monthly: f64,
    pub daily_average: f64,
    pub weekly_average: f64,
    /// `adjusted_monthly - monthly_base`
    pub household_adjustment: f64,
    /// Multipliers in the order they were applied
    pub applied: Vec<AppliedAdjustment>,
}
