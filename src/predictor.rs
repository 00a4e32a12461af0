//! Point-estimate predictors
//!
//! The forecasting forms only need a single scalar per feature vector. How the
//! model was trained is not our concern; a predictor just has to turn
//! [`Features`] into non-negative average usage per unit time.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ModelConfig, ModelKind};
use crate::models::Features;
use crate::{PowercastError, Result};

pub trait Predictor: Send + Sync {
    /// Short human-readable name, shown in verbose output
    fn name(&self) -> &str;

    fn predict(&self, features: &Features) -> Result<f64>;
}

/// Naive baseline: the next period looks like the previous one
#[derive(Debug, Default, Clone)]
pub struct PersistencePredictor;

impl Predictor for PersistencePredictor {
    fn name(&self) -> &str {
        "persistence"
    }

    fn predict(&self, features: &Features) -> Result<f64> {
        Ok(features.lag_1.max(0.0))
    }
}

/// Per-feature weights of a linear model; absent weights are zero
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinearWeights {
    pub month: f64,
    pub day_of_week: f64,
    pub lag_1: f64,
    pub lag_7: f64,
    pub hour: f64,
}

/// Linear regression exported as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearPredictor {
    pub intercept: f64,
    #[serde(default)]
    pub weights: LinearWeights,
}

impl LinearPredictor {
    /// Load model coefficients from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let model: LinearPredictor = serde_json::from_str(&raw).map_err(|e| {
            PowercastError::model(format!("Failed to parse {}: {e}", path.display()))
        })?;
        model.validate()?;
        debug!("Loaded linear model from {}", path.display());
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let all = [self.intercept, w.month, w.day_of_week, w.lag_1, w.lag_7, w.hour];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(PowercastError::model("Model coefficients must be finite"));
        }
        Ok(())
    }
}

// A weighted optional feature must be present; an unweighted one is ignored.
fn optional_term(weight: f64, value: Option<f64>, name: &str) -> Result<f64> {
    if weight == 0.0 {
        return Ok(0.0);
    }
    value
        .map(|v| weight * v)
        .ok_or_else(|| PowercastError::model(format!("Model requires feature '{name}'")))
}

impl Predictor for LinearPredictor {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, features: &Features) -> Result<f64> {
        let w = &self.weights;
        let value = self.intercept
            + w.month * f64::from(features.month)
            + w.day_of_week * f64::from(features.day_of_week)
            + w.lag_1 * features.lag_1
            + optional_term(w.lag_7, features.lag_7, "lag_7")?
            + optional_term(w.hour, features.hour.map(f64::from), "hour")?;

        if value < 0.0 {
            warn!("Linear model produced {value:.3}, clamping to zero");
            return Ok(0.0);
        }
        Ok(value)
    }
}

/// Build the predictor selected in the configuration
pub fn load_predictor(config: &ModelConfig) -> Result<Box<dyn Predictor>> {
    match config.kind {
        ModelKind::Persistence => Ok(Box::new(PersistencePredictor)),
        ModelKind::Linear => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| PowercastError::config("Linear model requires model.path"))?;
            Ok(Box::new(LinearPredictor::from_file(path)?))
        }
    }
}
