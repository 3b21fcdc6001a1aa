//! Permission → coordinates → reverse geocode, with stale-result discard.
//!
//! Every call to [`LocationWorkflow::resolve`] takes a new generation number
//! and moves the status to `Loading`. When the invocation finishes it writes
//! its terminal status only if no newer invocation has started since, so a
//! slow earlier lookup can never overwrite the result of a later retry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::address::format_address;
use crate::device::{LocationProvider, ReverseGeocoder};
use crate::display::DisplayOptions;
use crate::types::{CoordinateError, LocationStatus, Permission};

/// Deadline for a single coordinate read.
pub const DEFAULT_COORDINATE_TIMEOUT: Duration = Duration::from_secs(15);

/// Outcome of one [`LocationWorkflow::resolve`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub generation: u64,
    pub status: LocationStatus,
    /// `false` when a newer invocation superseded this one and its status was dropped.
    pub applied: bool,
}

pub struct LocationWorkflow<P, G> {
    provider: P,
    geocoder: G,
    coordinate_timeout: Duration,
    status: watch::Sender<LocationStatus>,
    generation: AtomicU64,
}

impl<P, G> std::fmt::Debug for LocationWorkflow<P, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationWorkflow")
            .field("coordinate_timeout", &self.coordinate_timeout)
            .field("status", &*self.status.borrow())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<P, G> LocationWorkflow<P, G>
where
    P: LocationProvider,
    G: ReverseGeocoder,
{
    #[must_use]
    pub fn new(provider: P, geocoder: G) -> Self {
        let (status, _) = watch::channel(LocationStatus::Idle);
        Self {
            provider,
            geocoder,
            coordinate_timeout: DEFAULT_COORDINATE_TIMEOUT,
            status,
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_coordinate_timeout(mut self, timeout: Duration) -> Self {
        self.coordinate_timeout = timeout;
        self
    }

    /// Deadline applied to each coordinate read.
    #[must_use]
    pub fn coordinate_timeout(&self) -> Duration {
        self.coordinate_timeout
    }

    #[must_use]
    pub fn status(&self) -> LocationStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified on every applied status change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LocationStatus> {
        self.status.subscribe()
    }

    /// Display string for the current status.
    #[must_use]
    pub fn display(&self, options: &DisplayOptions) -> String {
        self.status.borrow().display(options)
    }

    /// Generation of the most recently started invocation (0 before the first).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Run one invocation of the workflow.
    pub async fn resolve(&self) -> Resolution {
        let generation = self.begin();
        let status = self.run(generation).await;
        let applied = self.finish(generation, status.clone());
        if applied {
            tracing::debug!(generation, ?status, "location status applied");
        } else {
            tracing::debug!(
                generation,
                latest = self.generation(),
                "discarding superseded location result"
            );
        }
        Resolution {
            generation,
            status,
            applied,
        }
    }

    /// Leave a terminal state by running the workflow again.
    pub async fn retry(&self) -> Resolution {
        tracing::debug!(from = ?self.status(), "retrying location lookup");
        self.resolve().await
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        // The bump and the Loading write share the channel lock so that
        // `finish` never observes one without the other.
        self.status.send_modify(|status| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *status = LocationStatus::Loading;
        });
        generation
    }

    fn finish(&self, generation: u64, status: LocationStatus) -> bool {
        self.status.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = status;
            true
        })
    }

    async fn run(&self, generation: u64) -> LocationStatus {
        if self.provider.request_permission().await == Permission::Denied {
            tracing::debug!(generation, "location permission denied");
            return LocationStatus::PermissionDenied;
        }

        let read = self.provider.current_coordinates(self.coordinate_timeout);
        let coordinates = match tokio::time::timeout(self.coordinate_timeout, read).await {
            Ok(Ok(coordinates)) => coordinates,
            Ok(Err(CoordinateError::Unavailable)) => {
                tracing::debug!(generation, "device location unavailable");
                return LocationStatus::Unavailable;
            }
            Ok(Err(CoordinateError::Timeout)) | Err(_) => {
                tracing::debug!(
                    generation,
                    timeout_ms = u64::try_from(self.coordinate_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                    "location request timed out"
                );
                return LocationStatus::Timeout;
            }
        };

        let coordinates_only = LocationStatus::ResolvedCoordinatesOnly {
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        };

        match self.geocoder.reverse_geocode(coordinates).await {
            Ok(Some(candidate)) => LocationStatus::Resolved(format_address(&candidate)),
            Ok(None) => {
                tracing::warn!(
                    generation,
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "reverse geocoding returned no candidate"
                );
                coordinates_only
            }
            Err(e) => {
                tracing::warn!(
                    generation,
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    error = %e,
                    "reverse geocoding failed"
                );
                coordinates_only
            }
        }
    }
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
