//! Values exchanged with the device and geocoder, and the workflow status.

/// A device position fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Why the device could not produce a position fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    Unavailable,
    Timeout,
}

/// First candidate returned by reverse geocoding. Every component is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCandidate {
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// Progress of the location workflow. Exactly one holds at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LocationStatus {
    #[default]
    Idle,
    Loading,
    PermissionDenied,
    Unavailable,
    Timeout,
    Resolved(String),
    /// Coordinates were read but no address could be produced for them.
    ResolvedCoordinatesOnly { latitude: f64, longitude: f64 },
}

impl LocationStatus {
    /// Failure states that offer the user a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LocationStatus::PermissionDenied | LocationStatus::Unavailable | LocationStatus::Timeout
        )
    }

    /// States the workflow settles in once an invocation finishes.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LocationStatus::Idle | LocationStatus::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_and_loading_are_not_terminal() {
        assert!(!LocationStatus::Idle.is_terminal());
        assert!(!LocationStatus::Loading.is_terminal());
    }

    #[test]
    fn every_outcome_is_terminal() {
        for status in [
            LocationStatus::PermissionDenied,
            LocationStatus::Unavailable,
            LocationStatus::Timeout,
            LocationStatus::Resolved("Springfield".to_string()),
            LocationStatus::ResolvedCoordinatesOnly {
                latitude: 1.0,
                longitude: 2.0,
            },
        ] {
            assert!(status.is_terminal(), "{status:?} should be terminal");
        }
    }

    #[test]
    fn default_status_is_idle() {
        assert_eq!(LocationStatus::default(), LocationStatus::Idle);
    }
}
