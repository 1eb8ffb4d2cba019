//! Configuration loader for the `sensor-dashboard` client.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). The library modules never read the
//! environment themselves; they receive what they need from [`Config`].
//!
use std::{env, time::Duration};

use anyhow::{anyhow, Result};

use crate::chart::ChartVariant;
use crate::filter::TimeRange;

/// Server address used when `API_BASE_URL` is not set.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional `FromStr` environment variable with a default value.
macro_rules! parse_env_or {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Base address of the authentication / sensor data server.
    pub api_base_url: String,

    /// Per-request timeout of the HTTP client, in seconds.
    pub http_timeout_secs: u32,

    /// Credentials the binary logs in with.
    pub username: String,
    pub password: String,

    /// Initial selector values of the graph screen.
    pub time_range: TimeRange,
    pub chart_variant: ChartVariant,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `DASHBOARD_USERNAME` – login username
/// - `DASHBOARD_PASSWORD` – login password
///
/// Optional:
/// - `API_BASE_URL` – server address (default: `http://localhost:3000`)
/// - `HTTP_TIMEOUT_SECS` – request timeout (default: 30)
/// - `DASHBOARD_TIME_RANGE` – `lastHour`, `last24Hours`, `lastWeek`,
///   `last30Days` (default: `lastHour`; anything else shows everything)
/// - `DASHBOARD_CHART` – `line` or `bar` (default: `line`)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let username = require_env!("DASHBOARD_USERNAME");
    let password = require_env!("DASHBOARD_PASSWORD");
    let api_base_url =
        env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let http_timeout_secs = parse_env_u32!("HTTP_TIMEOUT_SECS", 30);
    let time_range = parse_env_or!("DASHBOARD_TIME_RANGE", TimeRange, TimeRange::default());
    let chart_variant = parse_env_or!("DASHBOARD_CHART", ChartVariant, ChartVariant::default());

    Ok(Config {
        api_base_url,
        http_timeout_secs,
        username,
        password,
        time_range,
        chart_variant,
    })
}

impl Config {
    /// Build the HTTP client shared by the session and sensor clients.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        // ---
        reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(self.http_timeout_secs)))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the password while showing all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  API_BASE_URL         : {}", self.api_base_url);
        tracing::info!("  HTTP_TIMEOUT_SECS    : {}", self.http_timeout_secs);
        tracing::info!("  DASHBOARD_USERNAME   : {}", self.username);
        tracing::info!("  DASHBOARD_PASSWORD   : {}", mask(&self.password));
        tracing::info!("  DASHBOARD_TIME_RANGE : {}", self.time_range);
        tracing::info!("  DASHBOARD_CHART      : {}", self.chart_variant);
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "(empty)"
    } else {
        "****"
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_mask_never_echoes_secret() {
        // ---
        assert_eq!(mask("hunter2"), "****");
        assert_eq!(mask(""), "(empty)");
    }

    #[test]
    fn test_http_client_builds() {
        // ---
        let cfg = Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            http_timeout_secs: 5,
            username: "a".to_string(),
            password: "b".to_string(),
            time_range: TimeRange::default(),
            chart_variant: ChartVariant::default(),
        };
        tokio_test::assert_ok!(cfg.http_client());
    }
}
