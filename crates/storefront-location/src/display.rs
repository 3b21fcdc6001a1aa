//! The one-line location string shown on the home and stores screens.

use crate::types::LocationStatus;

/// Address budget used on narrow displays.
pub const NARROW_ADDRESS_MAX_CHARS: usize = 30;

pub const LOADING_MESSAGE: &str = "Getting location...";
pub const PERMISSION_DENIED_MESSAGE: &str = "Location permission denied";
pub const UNAVAILABLE_MESSAGE: &str = "Location unavailable";
pub const TIMEOUT_MESSAGE: &str = "Location request timed out";
pub const COORDINATES_ONLY_MESSAGE: &str = "📍 Getting address...";
pub const IDLE_MESSAGE: &str = "Location not available";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Truncate resolved addresses longer than this many characters.
    pub max_address_chars: Option<usize>,
}

impl DisplayOptions {
    #[must_use]
    pub fn narrow() -> Self {
        Self {
            max_address_chars: Some(NARROW_ADDRESS_MAX_CHARS),
        }
    }
}

impl LocationStatus {
    #[must_use]
    pub fn display(&self, options: &DisplayOptions) -> String {
        match self {
            LocationStatus::Idle => IDLE_MESSAGE.to_string(),
            LocationStatus::Loading => LOADING_MESSAGE.to_string(),
            LocationStatus::PermissionDenied => PERMISSION_DENIED_MESSAGE.to_string(),
            LocationStatus::Unavailable => UNAVAILABLE_MESSAGE.to_string(),
            LocationStatus::Timeout => TIMEOUT_MESSAGE.to_string(),
            LocationStatus::Resolved(address) => match options.max_address_chars {
                Some(max) if address.chars().count() > max => {
                    let head: String = address.chars().take(max).collect();
                    format!("📍 {head}...")
                }
                _ => format!("📍 {address}"),
            },
            LocationStatus::ResolvedCoordinatesOnly { .. } => COORDINATES_ONLY_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display(&DisplayOptions::default()))
    }
}
