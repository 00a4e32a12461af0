//! Feature vector handed to the point-estimate predictor

use serde::{Deserialize, Serialize};

/// Inputs for a single model evaluation.
///
/// `hour` is only set by the hourly and monthly forms, `lag_7` only by the
/// daily form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    /// Calendar month (1-12)
    pub month: u32,
    /// Day of week, Monday = 0
    pub day_of_week: u32,
    /// Usage one period before the target
    pub lag_1: f64,
    /// Usage one week before the target
    pub lag_7: Option<f64>,
    /// Hour of day (0-23)
    pub hour: Option<u32>,
}

impl Features {
    #[must_use]
    pub fn new(month: u32, day_of_week: u32, lag_1: f64) -> Self {
        Self {
            month,
            day_of_week,
            lag_1,
            lag_7: None,
            hour: None,
        }
    }

    #[must_use]
    pub fn with_hour(mut self, hour: u32) -> Self {
        self.hour = Some(hour);
        self
    }

    #[must_use]
    pub fn with_lag_7(mut self, lag_7: f64) -> Self {
        self.lag_7 = Some(lag_7);
        self
    }
}
