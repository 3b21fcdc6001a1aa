use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment, LocationPermission};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        parse_number(var, &or_default(var, default))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        parse_number(var, &or_default(var, default))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        parse_number(var, &or_default(var, default))
    };

    let parse_coordinate = |var: &str, limit: f64| -> Result<Option<f64>, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(None);
        };
        let value: f64 = parse_number(var, &raw)?;
        if !value.is_finite() || value.abs() > limit {
            return Err(invalid(var, format!("must be within ±{limit}")));
        }
        Ok(Some(value))
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"));
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let catalog_path = lookup("STOREFRONT_CATALOG_PATH").ok().map(PathBuf::from);

    let location_timeout_ms = parse_u64("STOREFRONT_LOCATION_TIMEOUT_MS", "15000")?;
    let address_max_chars = parse_usize("STOREFRONT_ADDRESS_MAX_CHARS", "30")?;

    let geocoder_url = or_default(
        "STOREFRONT_GEOCODER_URL",
        "https://nominatim.openstreetmap.org",
    );
    let geocoder_user_agent = or_default(
        "STOREFRONT_GEOCODER_USER_AGENT",
        "storefront/0.1 (store-browser)",
    );
    let geocoder_timeout_secs = parse_u64("STOREFRONT_GEOCODER_TIMEOUT_SECS", "10")?;
    let geocoder_max_retries = parse_u32("STOREFRONT_GEOCODER_MAX_RETRIES", "2")?;
    let geocoder_backoff_base_ms = parse_u64("STOREFRONT_GEOCODER_BACKOFF_BASE_MS", "500")?;

    let latitude = parse_coordinate("STOREFRONT_DEVICE_LATITUDE", 90.0)?;
    let longitude = parse_coordinate("STOREFRONT_DEVICE_LONGITUDE", 180.0)?;
    let device_position = match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        (None, None) => None,
        (Some(_), None) => {
            return Err(invalid(
                "STOREFRONT_DEVICE_LONGITUDE",
                "must be set when STOREFRONT_DEVICE_LATITUDE is set".to_string(),
            ))
        }
        (None, Some(_)) => {
            return Err(invalid(
                "STOREFRONT_DEVICE_LATITUDE",
                "must be set when STOREFRONT_DEVICE_LONGITUDE is set".to_string(),
            ))
        }
    };

    let location_permission = parse_permission(&or_default(
        "STOREFRONT_LOCATION_PERMISSION",
        "granted",
    ))?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        location_timeout_ms,
        address_max_chars,
        geocoder_url,
        geocoder_user_agent,
        geocoder_timeout_secs,
        geocoder_max_retries,
        geocoder_backoff_base_ms,
        device_position,
        location_permission,
    })
}

fn parse_number<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_permission(s: &str) -> Result<LocationPermission, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "granted" => Ok(LocationPermission::Granted),
        "denied" => Ok(LocationPermission::Denied),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_LOCATION_PERMISSION".to_string(),
            reason: format!("expected granted or denied, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
