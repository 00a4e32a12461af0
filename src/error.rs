//! Error types and handling for `Powercast`

use thiserror::Error;

/// Main error type for the `Powercast` application
#[derive(Error, Debug)]
pub enum PowercastError {
    /// Negative or non-finite base prediction
    #[error("Invalid prediction: {value} is not a non-negative usage value")]
    InvalidPrediction { value: f64 },

    /// Month outside 1-12
    #[error("Invalid month: {month} (expected 1-12)")]
    InvalidMonth { month: u32 },

    /// Unrecognized household category text
    #[error("Invalid {kind}: '{value}'")]
    InvalidCategory { kind: &'static str, value: String },

    /// Year outside the configured forecast range
    #[error("Invalid year: {year} (expected {min}-{max})")]
    InvalidYear { year: i32, min: i32, max: i32 },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Predictor loading or evaluation errors
    #[error("Model error: {message}")]
    Model { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PowercastError {
    /// Create a new category error
    pub fn category<S: Into<String>>(kind: &'static str, value: S) -> Self {
        Self::InvalidCategory {
            kind,
            value: value.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new model error
    pub fn model<S: Into<String>>(message: S) -> Self {
        Self::Model {
            message: message.into(),
        }
    }

    /// True for failures caused by the caller's input rather than the environment
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PowercastError::InvalidPrediction { .. }
                | PowercastError::InvalidMonth { .. }
                | PowercastError::InvalidCategory { .. }
                | PowercastError::InvalidYear { .. }
                | PowercastError::Validation { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PowercastError::InvalidPrediction { value } => {
                format!("Base prediction {value} is unusable. Usage values must be zero or positive.")
            }
            PowercastError::InvalidMonth { month } => {
                format!("Month {month} does not exist. Please pick a month between 1 and 12.")
            }
            PowercastError::InvalidCategory { kind, value } => {
                format!("Unknown {kind} '{value}'.")
            }
            PowercastError::InvalidYear { min, max, .. } => {
                format!("Please pick a year between {min} and {max}.")
            }
            PowercastError::Validation { message } => format!("Invalid input: {message}"),
            PowercastError::Config { .. } => {
                "Configuration error. Please check your config file and model settings.".to_string()
            }
            PowercastError::Model { .. } => {
                "The forecasting model could not produce a prediction. Please check the model file."
                    .to_string()
            }
            PowercastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let category_err = PowercastError::category("heating type", "Coal");
        assert!(matches!(category_err, PowercastError::InvalidCategory { .. }));

        let config_err = PowercastError::config("missing model path");
        assert!(matches!(config_err, PowercastError::Config { .. }));

        let model_err = PowercastError::model("bad weights");
        assert!(matches!(model_err, PowercastError::Model { .. }));
    }

    #[test]
    fn test_user_messages() {
        let month_err = PowercastError::InvalidMonth { month: 13 };
        assert!(month_err.user_message().contains("between 1 and 12"));

        let category_err = PowercastError::category("home size", "Huge");
        assert!(category_err.user_message().contains("Huge"));

        let validation_err = PowercastError::validation("hour out of range");
        assert!(validation_err.user_message().contains("hour out of range"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(PowercastError::InvalidPrediction { value: -1.0 }.is_input_error());
        assert!(
            PowercastError::InvalidYear {
                year: 1800,
                min: 2000,
                max: 2100
            }
            .is_input_error()
        );
        assert!(!PowercastError::model("broken").is_input_error());
        assert!(!PowercastError::config("broken").is_input_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PowercastError = io_err.into();
        assert!(matches!(err, PowercastError::Io { .. }));
    }
}
