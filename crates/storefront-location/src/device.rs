//! Collaborators the workflow drives: the device location API and a
//! reverse geocoder.

use std::future::Future;
use std::time::Duration;

use crate::error::LocationError;
use crate::types::{AddressCandidate, CoordinateError, Coordinates, Permission};

/// Device permission prompt and position source.
pub trait LocationProvider: Send + Sync {
    fn request_permission(&self) -> impl Future<Output = Permission> + Send;

    /// Read the current position, giving up after `timeout`.
    ///
    /// Implementations that cannot honor `timeout` themselves are still
    /// bounded: the workflow wraps this call in its own deadline.
    fn current_coordinates(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<Coordinates, CoordinateError>> + Send;
}

/// Turns coordinates into an address candidate.
pub trait ReverseGeocoder: Send + Sync {
    /// `Ok(None)` means the lookup succeeded but produced no candidate.
    fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Result<Option<AddressCandidate>, LocationError>> + Send;
}

/// A device that always answers the same way.
///
/// Backs the CLI, where the "device" is whatever position the configuration
/// supplies. A `None` position behaves like a device with no fix.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    permission: Permission,
    position: Option<Coordinates>,
}

impl FixedLocationProvider {
    #[must_use]
    pub fn new(permission: Permission, position: Option<Coordinates>) -> Self {
        Self {
            permission,
            position,
        }
    }
}

impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> Permission {
        self.permission
    }

    async fn current_coordinates(
        &self,
        _timeout: Duration,
    ) -> Result<Coordinates, CoordinateError> {
        self.position.ok_or(CoordinateError::Unavailable)
    }
}
