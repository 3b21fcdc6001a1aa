//! Location resolution: permission, coordinates, reverse geocoding, and the
//! single status string the home and stores screens display.

pub mod address;
pub mod device;
pub mod display;
pub mod error;
pub mod nominatim;
pub(crate) mod retry;
pub mod types;
pub mod workflow;

pub use address::format_address;
pub use device::{FixedLocationProvider, LocationProvider, ReverseGeocoder};
pub use display::{DisplayOptions, NARROW_ADDRESS_MAX_CHARS};
pub use error::LocationError;
pub use nominatim::NominatimGeocoder;
pub use types::{AddressCandidate, CoordinateError, Coordinates, LocationStatus, Permission};
pub use workflow::{LocationWorkflow, Resolution, DEFAULT_COORDINATE_TIMEOUT};
