//! Configuration management for `Powercast`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PowercastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `Powercast`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowercastConfig {
    /// Point-estimate model selection
    #[serde(default)]
    pub model: ModelConfig,
    /// Forecast input limits
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Which predictor backs the forecasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Previous usage carried forward
    #[default]
    Persistence,
    /// JSON-exported linear regression
    Linear,
}

/// Model configuration settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub kind: ModelKind,
    /// Path to the model file (required for `linear`)
    pub path: Option<String>,
}

/// Forecast input limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Earliest year the monthly form accepts
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    /// Latest year the monthly form accepts
    #[serde(default = "default_max_year")]
    pub max_year: i32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

// Default value functions
fn default_min_year() -> i32 {
    2000
}

fn default_max_year() -> i32 {
    2100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl PowercastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path.as_ref().filter(|path| !path.exists()) {
            return Err(
                PowercastError::config(format!("Config file not found: {}", path.display())).into(),
            );
        }

        if let Some(config_file) = Self::resolve_config_path(config_path) {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // POWERCAST_MODEL__PATH, POWERCAST_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("POWERCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PowercastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("powercast").join("config.toml"))
    }

    /// The file a load reads: the explicit path, else the user config file,
    /// else `config.toml` in the working directory. `None` when no default
    /// file exists and only env vars and built-in defaults apply.
    #[must_use]
    pub fn resolve_config_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
        if config_path.is_some() {
            return config_path;
        }
        Self::get_config_path()
            .filter(|path| path.exists())
            .or_else(|| Some(PathBuf::from("config.toml")).filter(|path| path.exists()))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.model.path.as_deref().is_some_and(str::is_empty) {
            self.model.path = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_model()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_model(&self) -> Result<()> {
        if self.model.kind == ModelKind::Linear && self.model.path.is_none() {
            return Err(
                PowercastError::config("Model kind 'linear' requires model.path to be set").into(),
            );
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.forecast.min_year > self.forecast.max_year {
            return Err(PowercastError::config(format!(
                "forecast.min_year ({}) cannot be after forecast.max_year ({})",
                self.forecast.min_year, self.forecast.max_year
            ))
            .into());
        }

        if self.server.port == 0 {
            return Err(PowercastError::config("Server port cannot be 0").into());
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                PowercastError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PowercastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PowercastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
