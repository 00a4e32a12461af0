//! Report rendering for forecasts
//!
//! Text output uses the rounding of the forecast forms: monthly totals to
//! whole kWh, daily and weekly averages to one decimal, point predictions to
//! two decimals.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::forecast::{DailyForecast, HourlyForecast, MonthlyForecast};
use crate::{PowercastError, Result};

const TEMPERATURE_TIPS: [&str; 3] = [
    "Keep windows open for natural ventilation",
    "Use curtains to block direct sunlight",
    "Set AC temperature to 26°C or higher",
];

const USAGE_TIPS: [&str; 4] = [
    "Unplug devices when not in use",
    "Use LED bulbs and energy-efficient appliances",
    "Run heavy appliances during off-peak hours (night)",
    "Use solar panels if available",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Render any forecast in the requested format
pub fn render<T: Serialize + Display>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| PowercastError::validation(format!("Failed to serialize report: {e}"))),
    }
}

impl Display for HourlyForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "🔋 Predicted Electricity Usage: {:.2} kW",
            self.predicted_kw
        )?;
        writeln!(
            f,
            "   ⏰ Hour {} · day {} of week · month {}",
            self.input.hour, self.input.day_of_week, self.input.month
        )?;
        write!(
            f,
            "   ↩️ Previous hour: {:.2} kW",
            self.input.previous_hour_usage
        )
    }
}

impl Display for DailyForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "🔋 Predicted Electricity Usage for {}: {:.2} kW",
            self.date.format("%Y-%m-%d"),
            self.predicted_kw
        )?;
        write!(
            f,
            "   📅 Based on usage from {} and {}",
            self.previous_day.format("%Y-%m-%d"),
            self.previous_week_day.format("%Y-%m-%d")
        )
    }
}

impl Display for MonthlyForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let adjustment = &self.adjustment;
        writeln!(f, "🎯 {} {}", self.month_name, self.year)?;
        writeln!(
            f,
            "   Previous month ({} {}): {:.0} kWh",
            self.previous_month_name, self.previous_year, self.previous_month_usage
        )?;
        writeln!(
            f,
            "   Average monthly usage: {:.0} kWh",
            self.average_monthly_usage
        )?;
        writeln!(
            f,
            "   Expected temperature: {}°C",
            self.average_temperature_c
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "🔋 Total Consumption: {:.0} kWh",
            adjustment.adjusted_monthly
        )?;
        writeln!(
            f,
            "   {:+.0} kWh (household adjustment, factor {:.4})",
            adjustment.household_adjustment, adjustment.adjustment_factor
        )?;
        for applied in &adjustment.applied {
            writeln!(f, "     {:<15} ×{:.2}", applied.rule.to_string(), applied.multiplier)?;
        }
        writeln!(
            f,
            "   Daily Average: {:.1} kWh/day",
            adjustment.daily_average
        )?;
        writeln!(
            f,
            "   Weekly Average: {:.1} kWh/week",
            adjustment.weekly_average
        )?;
        writeln!(f)?;
        write!(f, "💡 Energy Saving Tips")?;
        for (heading, tips) in [
            ("Temperature Control", &TEMPERATURE_TIPS[..]),
            ("Smart Usage", &USAGE_TIPS[..]),
        ] {
            write!(f, "\n   {heading}")?;
            for tip in tips {
                write!(f, "\n     - {tip}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustment;
    use crate::forecast::HourlyInput;
    use crate::models::{HeatingType, HomeSize, PredictionRequest};

    fn monthly() -> MonthlyForecast {
        let request = PredictionRequest {
            target_year: 2024,
            target_month: 1,
            base_prediction: 40.0,
            household_size: 5,
            home_size: HomeSize::From2000To2500,
            heating_type: HeatingType::Electric,
            average_temperature_c: 5,
        };
        MonthlyForecast {
            year: 2024,
            month: 1,
            month_name: "January".to_string(),
            previous_year: 2023,
            previous_month: 12,
            previous_month_name: "December".to_string(),
            previous_month_usage: 1200.0,
            average_monthly_usage: 1200.0,
            average_temperature_c: 5,
            base_prediction: 40.0,
            adjustment: adjustment::adjust(&request).unwrap(),
        }
    }

    #[test]
    fn test_monthly_text_report() {
        let text = render(&monthly(), OutputFormat::Text).unwrap();
        assert!(text.contains("January 2024"));
        assert!(text.contains("December 2023"));
        assert!(text.contains("Total Consumption: 1981 kWh"));
        assert!(text.contains("+741 kWh (household adjustment"));
        assert!(text.contains("Daily Average: 63.9 kWh/day"));
        assert!(text.contains("Weekly Average: 457.4 kWh/week"));
        assert!(text.contains("Heating type"));
        assert!(text.contains("Energy Saving Tips"));
        assert!(text.contains("- Set AC temperature to 26°C or higher"));
        assert!(text.ends_with("- Use solar panels if available"));
    }

    #[test]
    fn test_monthly_json_report() {
        let json = render(&monthly(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["month_name"], "January");
        assert_eq!(value["adjustment"]["days_in_month"], 31);
        assert_eq!(value["adjustment"]["applied"][0]["rule"], "temperature");
    }

    #[test]
    fn test_hourly_text_report() {
        let forecast = HourlyForecast {
            input: HourlyInput {
                hour: 8,
                day_of_week: 1,
                month: 3,
                previous_hour_usage: 1.0,
            },
            predicted_kw: 1.234,
        };
        let text = render(&forecast, OutputFormat::Text).unwrap();
        assert!(text.contains("1.23 kW"));
    }
}
