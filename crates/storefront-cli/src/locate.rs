//! `locate` command: one pass of the location workflow against a fixed device.

use std::time::Duration;

use storefront_core::{AppConfig, LocationPermission};
use storefront_location::{
    Coordinates, DisplayOptions, FixedLocationProvider, LocationWorkflow, NominatimGeocoder,
    Permission,
};

/// Overrides taken from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LocateArgs {
    pub position: Option<(f64, f64)>,
    pub deny: bool,
    pub narrow: bool,
}

/// Build the simulated device: flags win over configuration.
pub(crate) fn device_from(config: &AppConfig, args: LocateArgs) -> FixedLocationProvider {
    let permission = if args.deny || config.location_permission == LocationPermission::Denied {
        Permission::Denied
    } else {
        Permission::Granted
    };
    let position = args
        .position
        .or(config.device_position)
        .map(|(lat, lon)| Coordinates::new(lat, lon));
    FixedLocationProvider::new(permission, position)
}

pub(crate) fn display_options(config: &AppConfig, narrow: bool) -> DisplayOptions {
    if narrow {
        DisplayOptions {
            max_address_chars: Some(config.address_max_chars),
        }
    } else {
        DisplayOptions::default()
    }
}

/// Run the workflow once and return the display string.
pub(crate) async fn run_locate(config: &AppConfig, args: LocateArgs) -> anyhow::Result<String> {
    let geocoder = NominatimGeocoder::new(
        &config.geocoder_url,
        config.geocoder_timeout_secs,
        &config.geocoder_user_agent,
        config.geocoder_max_retries,
        config.geocoder_backoff_base_ms,
    )?;
    let workflow = LocationWorkflow::new(device_from(config, args), geocoder)
        .with_coordinate_timeout(Duration::from_millis(config.location_timeout_ms));

    let resolution = workflow.resolve().await;
    tracing::info!(
        generation = resolution.generation,
        status = ?resolution.status,
        "location workflow finished"
    );

    let mut line = workflow.display(&display_options(config, args.narrow));
    if resolution.status.is_retryable() {
        line.push_str("\n(retry with `storefront locate`)");
    }
    Ok(line)
}
