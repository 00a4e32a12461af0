//! Monthly usage adjustment engine
//!
//! Scales a per-day model prediction to a whole month and compounds a fixed,
//! ordered set of household multipliers on top of it. Every rule is a pure
//! function of the request; the engine holds no state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::models::{AdjustmentResult, AppliedAdjustment, PredictionRequest};
use crate::{PowercastError, Result};

/// Approximate number of weeks in a month
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Below this average temperature (°C) the heating surcharge applies
pub const HEATING_THRESHOLD_C: i32 = 10;
/// Above this average temperature (°C) the cooling surcharge applies
pub const COOLING_THRESHOLD_C: i32 = 25;

const HEATING_LOAD: f64 = 1.2;
const COOLING_LOAD: f64 = 1.15;
const LARGE_HOUSEHOLD: f64 = 1.1;
const SMALL_HOUSEHOLD: f64 = 0.9;

/// A named multiplier applied to the monthly base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentRule {
    Temperature,
    HouseholdSize,
    HomeSize,
    HeatingType,
}

/// Rules in application order
pub const RULES: [AdjustmentRule; 4] = [
    AdjustmentRule::Temperature,
    AdjustmentRule::HouseholdSize,
    AdjustmentRule::HomeSize,
    AdjustmentRule::HeatingType,
];

impl AdjustmentRule {
    /// Multiplier this rule contributes for `request`; 1.0 means no adjustment
    #[must_use]
    pub fn multiplier(self, request: &PredictionRequest) -> f64 {
        match self {
            AdjustmentRule::Temperature => temperature_multiplier(request.average_temperature_c),
            AdjustmentRule::HouseholdSize => household_multiplier(request.household_size),
            AdjustmentRule::HomeSize => request.home_size.multiplier(),
            AdjustmentRule::HeatingType => request.heating_type.multiplier(),
        }
    }
}

impl fmt::Display for AdjustmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdjustmentRule::Temperature => "Temperature",
            AdjustmentRule::HouseholdSize => "Household size",
            AdjustmentRule::HomeSize => "Home size",
            AdjustmentRule::HeatingType => "Heating type",
        };
        f.write_str(name)
    }
}

fn temperature_multiplier(average_temperature_c: i32) -> f64 {
    if average_temperature_c < HEATING_THRESHOLD_C {
        HEATING_LOAD
    } else if average_temperature_c > COOLING_THRESHOLD_C {
        COOLING_LOAD
    } else {
        1.0
    }
}

// A household of three is the reference size
fn household_multiplier(household_size: u8) -> f64 {
    if household_size >= 4 {
        LARGE_HOUSEHOLD
    } else if household_size <= 2 {
        SMALL_HOUSEHOLD
    } else {
        1.0
    }
}

/// Cumulative factor of all rules, folded in order from 1.0
#[must_use]
pub fn adjustment_factor(request: &PredictionRequest) -> f64 {
    RULES
        .iter()
        .fold(1.0, |factor, rule| factor * rule.multiplier(request))
}

/// Scale a per-day prediction to the target month and apply the household rules.
pub fn adjust(request: &PredictionRequest) -> Result<AdjustmentResult> {
    if !request.base_prediction.is_finite() || request.base_prediction < 0.0 {
        return Err(PowercastError::InvalidPrediction {
            value: request.base_prediction,
        });
    }
    let days = calendar::days_in_month(request.target_year, request.target_month)?;
    let monthly_base = request.base_prediction * f64::from(days);

    let mut factor = 1.0;
    let mut applied = Vec::with_capacity(RULES.len());
    for rule in RULES {
        let multiplier = rule.multiplier(request);
        factor *= multiplier;
        applied.push(AppliedAdjustment { rule, multiplier });
    }

    let adjusted_monthly = monthly_base * factor;

    Ok(AdjustmentResult {
        days_in_month: days,
        monthly_base,
        adjustment_factor: factor,
        adjusted_monthly,
        daily_average: adjusted_monthly / f64::from(days),
        weekly_average: adjusted_monthly / WEEKS_PER_MONTH,
        household_adjustment: adjusted_monthly - monthly_base,
        applied,
    })
}
