//! Forecast service backing the hourly, daily and monthly forms
//!
//! Each form turns its inputs into a [`Features`] vector, asks the predictor
//! for a point estimate and, for the monthly form, runs the result through the
//! adjustment engine.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::adjustment;
use crate::calendar;
use crate::config::ForecastConfig;
use crate::models::{
    AdjustmentResult, Features, HeatingType, HomeSize, MAX_HOUSEHOLD_SIZE, MIN_HOUSEHOLD_SIZE,
    PredictionRequest,
};
use crate::predictor::Predictor;
use crate::{PowercastError, Result};

/// Monthly totals are converted to a per-day lag with this divisor
pub const DAYS_PER_MONTH_LAG: f64 = 30.0;
/// Hour of day used when the model is asked for a monthly figure
pub const MONTHLY_REFERENCE_HOUR: u32 = 12;
/// Day of week (Monday) used when the model is asked for a monthly figure
pub const MONTHLY_REFERENCE_WEEKDAY: u32 = 0;
/// Expected average temperatures (°C) the monthly form accepts
pub const TEMPERATURE_RANGE_C: RangeInclusive<i32> = -10..=40;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyInput {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Day of week, Monday = 0
    pub day_of_week: u32,
    pub month: u32,
    /// Usage during the previous hour in kW
    pub previous_hour_usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub input: HourlyInput,
    /// Predicted usage in kW
    pub predicted_kw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyInput {
    pub date: NaiveDate,
    /// Usage on the day before `date`
    pub previous_day_usage: f64,
    /// Usage one week before `date`
    pub previous_week_usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub previous_day: NaiveDate,
    pub previous_week_day: NaiveDate,
    pub predicted_kw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyInput {
    pub year: i32,
    pub month: u32,
    /// Total kWh used in the month before the target month
    pub previous_month_usage: f64,
    /// Typical monthly kWh, reported alongside the forecast
    pub average_monthly_usage: f64,
    pub average_temperature_c: i32,
    pub household_size: u8,
    pub home_size: HomeSize,
    pub heating_type: HeatingType,
}

impl Default for MonthlyInput {
    fn default() -> Self {
        Self {
            year: 2024,
            month: 1,
            previous_month_usage: 1000.0,
            average_monthly_usage: 1200.0,
            average_temperature_c: 20,
            household_size: 3,
            home_size: HomeSize::default(),
            heating_type: HeatingType::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub previous_year: i32,
    pub previous_month: u32,
    pub previous_month_name: String,
    pub previous_month_usage: f64,
    pub average_monthly_usage: f64,
    pub average_temperature_c: i32,
    /// Per-day model output before any adjustment
    pub base_prediction: f64,
    pub adjustment: AdjustmentResult,
}

/// Ties a predictor to the input limits of the three forms
pub struct ForecastService {
    predictor: Box<dyn Predictor>,
    limits: ForecastConfig,
}

impl ForecastService {
    pub fn new(predictor: Box<dyn Predictor>, limits: ForecastConfig) -> Self {
        Self { predictor, limits }
    }

    #[must_use]
    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn hourly(&self, input: HourlyInput) -> Result<HourlyForecast> {
        check_range("hour", input.hour, 0, 23)?;
        check_range("day of week", input.day_of_week, 0, 6)?;
        check_month(input.month)?;
        check_usage("previous hour usage", input.previous_hour_usage)?;

        let features =
            Features::new(input.month, input.day_of_week, input.previous_hour_usage).with_hour(input.hour);
        let predicted_kw = self.predict(&features)?;

        Ok(HourlyForecast {
            input,
            predicted_kw,
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn daily(&self, input: DailyInput) -> Result<DailyForecast> {
        check_usage("previous day usage", input.previous_day_usage)?;
        check_usage("previous week usage", input.previous_week_usage)?;

        let (previous_day, previous_week_day) = calendar::lag_dates(input.date)?;
        let features = Features::new(
            input.date.month(),
            calendar::day_of_week(input.date),
            input.previous_day_usage,
        )
        .with_lag_7(input.previous_week_usage);
        let predicted_kw = self.predict(&features)?;

        Ok(DailyForecast {
            date: input.date,
            previous_day,
            previous_week_day,
            predicted_kw,
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn monthly(&self, input: MonthlyInput) -> Result<MonthlyForecast> {
        self.check_year(input.year)?;
        let month_name = calendar::month_name(input.month)?;
        let (previous_year, previous_month) = calendar::previous_month(input.year, input.month)?;
        check_usage("previous month usage", input.previous_month_usage)?;
        check_usage("average monthly usage", input.average_monthly_usage)?;
        check_range(
            "household size",
            u32::from(input.household_size),
            u32::from(MIN_HOUSEHOLD_SIZE),
            u32::from(MAX_HOUSEHOLD_SIZE),
        )?;
        if !TEMPERATURE_RANGE_C.contains(&input.average_temperature_c) {
            return Err(PowercastError::validation(format!(
                "average temperature must be between {} and {} °C, got {}",
                TEMPERATURE_RANGE_C.start(),
                TEMPERATURE_RANGE_C.end(),
                input.average_temperature_c
            )));
        }

        let features = Features::new(
            input.month,
            MONTHLY_REFERENCE_WEEKDAY,
            input.previous_month_usage / DAYS_PER_MONTH_LAG,
        )
        .with_hour(MONTHLY_REFERENCE_HOUR);
        let base_prediction = self.predict(&features)?;

        let request = PredictionRequest {
            target_year: input.year,
            target_month: input.month,
            base_prediction,
            household_size: input.household_size,
            home_size: input.home_size,
            heating_type: input.heating_type,
            average_temperature_c: input.average_temperature_c,
        };
        let adjustment = adjustment::adjust(&request)?;
        debug!(
            factor = adjustment.adjustment_factor,
            adjusted = adjustment.adjusted_monthly,
            "Applied household adjustments"
        );

        Ok(MonthlyForecast {
            year: input.year,
            month: input.month,
            month_name: month_name.to_string(),
            previous_year,
            previous_month,
            previous_month_name: calendar::month_name(previous_month)?.to_string(),
            previous_month_usage: input.previous_month_usage,
            average_monthly_usage: input.average_monthly_usage,
            average_temperature_c: input.average_temperature_c,
            base_prediction,
            adjustment,
        })
    }

    fn predict(&self, features: &Features) -> Result<f64> {
        let value = self.predictor.predict(features)?;
        debug!(predictor = self.predictor.name(), value, "Model prediction");
        if !value.is_finite() || value < 0.0 {
            return Err(PowercastError::InvalidPrediction { value });
        }
        Ok(value)
    }

    fn check_year(&self, year: i32) -> Result<()> {
        let (min, max) = (self.limits.min_year, self.limits.max_year);
        if year < min || year > max {
            return Err(PowercastError::InvalidYear { year, min, max });
        }
        Ok(())
    }
}

fn check_month(month: u32) -> Result<()> {
    calendar::month_name(month).map(|_| ())
}

fn check_range(name: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(PowercastError::validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

fn check_usage(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PowercastError::validation(format!(
            "{name} must be zero or positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{LinearPredictor, LinearWeights, PersistencePredictor};

    fn service() -> ForecastService {
        ForecastService::new(Box::new(PersistencePredictor), ForecastConfig::default())
    }

    /// Echoes a fixed value so monthly scenarios can be pinned exactly
    struct FixedPredictor(f64);

    impl Predictor for FixedPredictor {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _features: &Features) -> Result<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_hourly_uses_previous_hour() {
        let forecast = service()
            .hourly(HourlyInput {
                hour: 12,
                day_of_week: 2,
                month: 7,
                previous_hour_usage: 1.4,
            })
            .unwrap();
        assert_eq!(forecast.predicted_kw, 1.4);
    }

    #[test]
    fn test_hourly_rejects_out_of_range_hour() {
        let err = service()
            .hourly(HourlyInput {
                hour: 24,
                day_of_week: 0,
                month: 1,
                previous_hour_usage: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, PowercastError::Validation { .. }));
    }

    #[test]
    fn test_hourly_rejects_bad_month() {
        let err = service()
            .hourly(HourlyInput {
                hour: 3,
                day_of_week: 0,
                month: 13,
                previous_hour_usage: 1.0,
            })
            .unwrap_err();
        assert!(matches!(err, PowercastError::InvalidMonth { month: 13 }));
    }

    #[test]
    fn test_daily_builds_lag_dates_and_features() {
        let model = LinearPredictor {
            intercept: 0.0,
            weights: LinearWeights {
                lag_1: 0.5,
                lag_7: 0.5,
                day_of_week: 1.0,
                ..LinearWeights::default()
            },
        };
        let service = ForecastService::new(Box::new(model), ForecastConfig::default());
        // Sunday
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let forecast = service
            .daily(DailyInput {
                date,
                previous_day_usage: 2.0,
                previous_week_usage: 4.0,
            })
            .unwrap();

        assert_eq!(forecast.previous_day, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(forecast.previous_week_day, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert!((forecast.predicted_kw - (1.0 + 2.0 + 6.0)).abs() < 1e-12);
    }

    #[test]
    fn test_daily_rejects_date_without_a_prior_week() {
        let err = service()
            .daily(DailyInput {
                date: NaiveDate::MIN,
                previous_day_usage: 1.0,
                previous_week_usage: 1.0,
            })
            .unwrap_err();
        assert!(err.is_input_error());
        assert!(err.user_message().contains("too early"));
    }

    #[test]
    fn test_monthly_scales_previous_month_to_daily_lag() {
        let forecast = service()
            .monthly(MonthlyInput {
                year: 2024,
                month: 6,
                previous_month_usage: 1500.0,
                household_size: 3,
                home_size: HomeSize::From1500To2000,
                heating_type: HeatingType::Gas,
                average_temperature_c: 20,
                ..MonthlyInput::default()
            })
            .unwrap();

        assert_eq!(forecast.base_prediction, 50.0);
        assert_eq!(forecast.month_name, "June");
        assert_eq!(forecast.previous_month_name, "May");
        assert_eq!(forecast.adjustment.monthly_base, 1500.0);
        assert_eq!(forecast.adjustment.adjustment_factor, 1.0);
    }

    #[test]
    fn test_monthly_january_wraps_previous_year() {
        let service = ForecastService::new(Box::new(FixedPredictor(40.0)), ForecastConfig::default());
        let forecast = service
            .monthly(MonthlyInput {
                year: 2024,
                month: 1,
                average_temperature_c: 5,
                household_size: 5,
                home_size: HomeSize::From2000To2500,
                heating_type: HeatingType::Electric,
                ..MonthlyInput::default()
            })
            .unwrap();

        assert_eq!(forecast.previous_year, 2023);
        assert_eq!(forecast.previous_month, 12);
        assert_eq!(forecast.previous_month_name, "December");
        assert!((forecast.adjustment.adjusted_monthly - 1980.53).abs() < 0.01);
    }

    #[test]
    fn test_monthly_year_outside_configured_range() {
        let limits = ForecastConfig {
            min_year: 2024,
            max_year: 2029,
        };
        let service = ForecastService::new(Box::new(PersistencePredictor), limits);
        let err = service
            .monthly(MonthlyInput {
                year: 2031,
                ..MonthlyInput::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            PowercastError::InvalidYear {
                year: 2031,
                min: 2024,
                max: 2029
            }
        ));
    }

    #[test]
    fn test_monthly_rejects_household_size_outside_form_limits() {
        let err = service()
            .monthly(MonthlyInput {
                household_size: 9,
                ..MonthlyInput::default()
            })
            .unwrap_err();
        assert!(matches!(err, PowercastError::Validation { .. }));
    }

    #[test]
    fn test_monthly_rejects_temperature_outside_form_limits() {
        let err = service()
            .monthly(MonthlyInput {
                average_temperature_c: 41,
                ..MonthlyInput::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_negative_model_output_is_invalid_prediction() {
        let service = ForecastService::new(Box::new(FixedPredictor(-1.0)), ForecastConfig::default());
        let err = service.monthly(MonthlyInput::default()).unwrap_err();
        assert!(matches!(err, PowercastError::InvalidPrediction { .. }));
    }
}
