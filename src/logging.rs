//! Tracing subscriber setup for the binary

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Resolve the filter directive: `RUST_LOG` wins, then `--verbose`, then the config level.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if verbose {
        "powercast=debug,info".to_string()
    } else {
        format!("powercast={level},warn", level = config.level)
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for reports.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(config, verbose)))
        .map_err(|e| anyhow!("Invalid log filter: {e}"))?;

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    let result = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.with_target(false).try_init(),
    };
    result.map_err(|e| anyhow!("Failed to initialise logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let config = LoggingConfig::default();
        assert_eq!(filter_directive(&config, false), "powercast=info,warn");
        assert!(filter_directive(&config, true).contains("powercast=debug"));
    }
}
