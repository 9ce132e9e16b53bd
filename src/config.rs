//! Configuration loader for the `floodwatch` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Lookups go through a closure so tests can supply
//! values without touching the process environment.
//!
use std::env;

use anyhow::{anyhow, Result};

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_FLOOD_API_URL: &str = "https://flood-api.open-meteo.com/v1/flood";

/// Parse an optional numeric variable with a default value.
macro_rules! parse_var {
    ($lookup:expr, $var_name:expr, $ty:ty, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string variable, treating empty values as unset.
macro_rules! optional_var {
    ($lookup:expr, $var_name:expr) => {
        $lookup($var_name).filter(|v: &String| !v.trim().is_empty())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// TCP port the HTTP server binds to.
    pub port: u16,

    /// Forecast API base URL (precipitation, soil moisture, elevation).
    pub weather_api_url: String,

    /// Flood API base URL (river discharge).
    pub flood_api_url: String,

    /// Optional API key appended to both upstream requests.
    pub open_meteo_api_key: Option<String>,

    /// Per-request upstream timeout in milliseconds.
    pub upstream_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            weather_api_url: DEFAULT_WEATHER_API_URL.to_string(),
            flood_api_url: DEFAULT_FLOOD_API_URL.to_string(),
            open_meteo_api_key: None,
            upstream_timeout_ms: 5000,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `PORT` – listen port (default: 8080)
/// - `WEATHER_API_URL` – forecast API (default: Open-Meteo forecast)
/// - `FLOOD_API_URL` – flood API (default: Open-Meteo flood)
/// - `OPEN_METEO_API_KEY` – API key for commercial endpoints
/// - `UPSTREAM_TIMEOUT_MS` – per-request timeout (default: 5000)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    Config::from_lookup(|name| env::var(name).ok())
}

impl Config {
    // ---
    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        // ---
        let defaults = Config::default();

        let port = parse_var!(lookup, "PORT", u16, defaults.port);
        let upstream_timeout_ms =
            parse_var!(lookup, "UPSTREAM_TIMEOUT_MS", u32, defaults.upstream_timeout_ms);
        let weather_api_url =
            optional_var!(lookup, "WEATHER_API_URL").unwrap_or(defaults.weather_api_url);
        let flood_api_url = optional_var!(lookup, "FLOOD_API_URL").unwrap_or(defaults.flood_api_url);
        let open_meteo_api_key = optional_var!(lookup, "OPEN_METEO_API_KEY");

        if upstream_timeout_ms == 0 {
            return Err(anyhow!("UPSTREAM_TIMEOUT_MS must be greater than zero"));
        }

        Ok(Config {
            port,
            weather_api_url,
            flood_api_url,
            open_meteo_api_key,
            upstream_timeout_ms,
        })
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// The API key is masked; only its last four characters are shown.
    pub fn log_config(&self) {
        // ---
        let masked_key = match &self.open_meteo_api_key {
            Some(key) if key.chars().count() > 4 => {
                let tail: String = key.chars().skip(key.chars().count() - 4).collect();
                format!("****{}", tail)
            }
            Some(_) => "****".to_string(),
            None => "(none)".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  PORT                : {}", self.port);
        tracing::info!("  WEATHER_API_URL     : {}", self.weather_api_url);
        tracing::info!("  FLOOD_API_URL       : {}", self.flood_api_url);
        tracing::info!("  OPEN_METEO_API_KEY  : {}", masked_key);
        tracing::info!("  UPSTREAM_TIMEOUT_MS : {}", self.upstream_timeout_ms);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        // ---
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        // ---
        let cfg = assert_ok!(Config::from_lookup(lookup_from(&[])));

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.weather_api_url, DEFAULT_WEATHER_API_URL);
        assert_eq!(cfg.flood_api_url, DEFAULT_FLOOD_API_URL);
        assert_eq!(cfg.open_meteo_api_key, None);
        assert_eq!(cfg.upstream_timeout_ms, 5000);
    }

    #[test]
    fn test_overrides_are_applied() {
        // ---
        let cfg = assert_ok!(Config::from_lookup(lookup_from(&[
            ("PORT", "9090"),
            ("WEATHER_API_URL", "http://weather.local/v1/forecast"),
            ("FLOOD_API_URL", "http://flood.local/v1/flood"),
            ("OPEN_METEO_API_KEY", "secret-key"),
            ("UPSTREAM_TIMEOUT_MS", " 1500 "),
        ])));

        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.weather_api_url, "http://weather.local/v1/forecast");
        assert_eq!(cfg.flood_api_url, "http://flood.local/v1/flood");
        assert_eq!(cfg.open_meteo_api_key.as_deref(), Some("secret-key"));
        assert_eq!(cfg.upstream_timeout_ms, 1500);
    }

    #[test]
    fn test_empty_strings_fall_back_to_defaults() {
        // ---
        let cfg = assert_ok!(Config::from_lookup(lookup_from(&[
            ("WEATHER_API_URL", ""),
            ("OPEN_METEO_API_KEY", "  "),
        ])));

        assert_eq!(cfg.weather_api_url, DEFAULT_WEATHER_API_URL);
        assert_eq!(cfg.open_meteo_api_key, None);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        // ---
        let err = assert_err!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])));
        assert!(err.to_string().contains("Invalid PORT"));

        assert_err!(Config::from_lookup(lookup_from(&[("PORT", "70000")])));
        assert_err!(Config::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_MS", "0")])));
    }
}
