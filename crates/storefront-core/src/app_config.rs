use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Answer the simulated device gives when asked for location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPermission {
    Granted,
    Denied,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Catalog file to load instead of the embedded seed.
    pub catalog_path: Option<PathBuf>,
    pub location_timeout_ms: u64,
    /// Character budget for addresses on narrow displays.
    pub address_max_chars: usize,
    pub geocoder_url: String,
    pub geocoder_user_agent: String,
    pub geocoder_timeout_secs: u64,
    pub geocoder_max_retries: u32,
    pub geocoder_backoff_base_ms: u64,
    /// Fixed `(latitude, longitude)` reported by the simulated device.
    /// `None` means the device has no position to report.
    pub device_position: Option<(f64, f64)>,
    pub location_permission: LocationPermission,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field("location_timeout_ms", &self.location_timeout_ms)
            .field("address_max_chars", &self.address_max_chars)
            .field("geocoder_url", &self.geocoder_url)
            .field("geocoder_user_agent", &self.geocoder_user_agent)
            .field("geocoder_timeout_secs", &self.geocoder_timeout_secs)
            .field("geocoder_max_retries", &self.geocoder_max_retries)
            .field("geocoder_backoff_base_ms", &self.geocoder_backoff_base_ms)
            .field(
                "device_position",
                &self.device_position.map(|_| "[redacted]"),
            )
            .field("location_permission", &self.location_permission)
            .finish()
    }
}
