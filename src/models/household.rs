//! Household descriptors used by the monthly adjustment rules

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PowercastError;

/// Smallest household the monthly form accepts
pub const MIN_HOUSEHOLD_SIZE: u8 = 1;
/// Largest household the monthly form accepts
pub const MAX_HOUSEHOLD_SIZE: u8 = 8;

/// Living area band in square feet
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum HomeSize {
    Under1000,
    From1000To1500,
    #[default]
    From1500To2000,
    From2000To2500,
    From2500To3000,
    Over3000,
}

impl HomeSize {
    /// All bands, smallest first
    pub const ALL: [HomeSize; 6] = [
        HomeSize::Under1000,
        HomeSize::From1000To1500,
        HomeSize::From1500To2000,
        HomeSize::From2000To2500,
        HomeSize::From2500To3000,
        HomeSize::Over3000,
    ];

    /// Consumption multiplier for this band
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            HomeSize::Under1000 => 0.8,
            HomeSize::From1000To1500 => 0.9,
            HomeSize::From1500To2000 => 1.0,
            HomeSize::From2000To2500 => 1.1,
            HomeSize::From2500To3000 => 1.2,
            HomeSize::Over3000 => 1.3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HomeSize::Under1000 => "Under 1000",
            HomeSize::From1000To1500 => "1000-1500",
            HomeSize::From1500To2000 => "1500-2000",
            HomeSize::From2000To2500 => "2000-2500",
            HomeSize::From2500To3000 => "2500-3000",
            HomeSize::Over3000 => "Over 3000",
        }
    }
}

impl fmt::Display for HomeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HomeSize {
    type Err = PowercastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "under1000" => Ok(HomeSize::Under1000),
            "10001500" => Ok(HomeSize::From1000To1500),
            "15002000" => Ok(HomeSize::From1500To2000),
            "20002500" => Ok(HomeSize::From2000To2500),
            "25003000" => Ok(HomeSize::From2500To3000),
            "over3000" => Ok(HomeSize::Over3000),
            _ => Err(PowercastError::category("home size", s)),
        }
    }
}

impl TryFrom<String> for HomeSize {
    type Error = PowercastError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HomeSize> for String {
    fn from(value: HomeSize) -> Self {
        value.label().to_string()
    }
}

/// Primary heating system of the home
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HeatingType {
    #[default]
    Electric,
    Gas,
    Oil,
    HeatPump,
    Other,
}

impl HeatingType {
    pub const ALL: [HeatingType; 5] = [
        HeatingType::Electric,
        HeatingType::Gas,
        HeatingType::Oil,
        HeatingType::HeatPump,
        HeatingType::Other,
    ];

    /// Extra electricity drawn by the heating system
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            HeatingType::Electric => 1.1,
            HeatingType::HeatPump => 1.05,
            HeatingType::Gas | HeatingType::Oil | HeatingType::Other => 1.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HeatingType::Electric => "Electric",
            HeatingType::Gas => "Gas",
            HeatingType::Oil => "Oil",
            HeatingType::HeatPump => "Heat Pump",
            HeatingType::Other => "Other",
        }
    }
}

impl fmt::Display for HeatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HeatingType {
    type Err = PowercastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "electric" => Ok(HeatingType::Electric),
            "gas" => Ok(HeatingType::Gas),
            "oil" => Ok(HeatingType::Oil),
            "heatpump" => Ok(HeatingType::HeatPump),
            "other" => Ok(HeatingType::Other),
            _ => Err(PowercastError::category("heating type", s)),
        }
    }
}

impl TryFrom<String> for HeatingType {
    type Error = PowercastError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HeatingType> for String {
    fn from(value: HeatingType) -> Self {
        value.label().to_string()
    }
}

// "Heat Pump", "heat-pump" and "heat_pump" all collapse to "heatpump"
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Under 1000", HomeSize::Under1000)]
    #[case("under-1000", HomeSize::Under1000)]
    #[case("1000-1500", HomeSize::From1000To1500)]
    #[case("2000-2500", HomeSize::From2000To2500)]
    #[case("over_3000", HomeSize::Over3000)]
    fn test_parse_home_size(#[case] input: &str, #[case] expected: HomeSize) {
        assert_eq!(input.parse::<HomeSize>().unwrap(), expected);
    }

    #[rstest]
    #[case("Electric", HeatingType::Electric)]
    #[case("Heat Pump", HeatingType::HeatPump)]
    #[case("heat-pump", HeatingType::HeatPump)]
    #[case("GAS", HeatingType::Gas)]
    #[case("other", HeatingType::Other)]
    fn test_parse_heating_type(#[case] input: &str, #[case] expected: HeatingType) {
        assert_eq!(input.parse::<HeatingType>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_categories_rejected() {
        let err = "Huge".parse::<HomeSize>().unwrap_err();
        assert!(matches!(err, PowercastError::InvalidCategory { kind: "home size", .. }));

        let err = "Coal".parse::<HeatingType>().unwrap_err();
        assert!(matches!(err, PowercastError::InvalidCategory { kind: "heating type", .. }));
    }

    #[test]
    fn test_labels_parse_back() {
        for size in HomeSize::ALL {
            assert_eq!(size.label().parse::<HomeSize>().unwrap(), size);
        }
        for heating in HeatingType::ALL {
            assert_eq!(heating.to_string().parse::<HeatingType>().unwrap(), heating);
        }
    }

    #[test]
    fn test_home_size_multipliers_increase_with_area() {
        let multipliers: Vec<f64> = HomeSize::ALL.iter().map(|s| s.multiplier()).collect();
        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(HomeSize::default().multiplier(), 1.0);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&HeatingType::HeatPump).unwrap();
        assert_eq!(json, "\"Heat Pump\"");
        let size: HomeSize = serde_json::from_str("\"Over 3000\"").unwrap();
        assert_eq!(size, HomeSize::Over3000);
        assert!(serde_json::from_str::<HomeSize>("\"Castle\"").is_err());
    }
}
