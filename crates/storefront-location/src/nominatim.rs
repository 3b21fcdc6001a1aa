//! Reverse geocoding over the OpenStreetMap Nominatim HTTP API.
//!
//! ## Response shape (`/reverse?format=jsonv2`)
//!
//! A hit carries an `address` object whose keys depend on the place:
//! `road`, `house_number`, one of `city` / `town` / `village`, `state`,
//! `country`, plus many others we ignore. A miss (open ocean, unmapped
//! area) is still HTTP 200 but the body is `{"error": "Unable to geocode"}`.
//! We treat that, and a body with no `address`, as "no candidate".

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::device::ReverseGeocoder;
use crate::error::LocationError;
use crate::retry::retry_with_backoff;
use crate::types::{AddressCandidate, Coordinates};

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    road: Option<String>,
    house_number: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl From<NominatimAddress> for AddressCandidate {
    fn from(address: NominatimAddress) -> Self {
        AddressCandidate {
            street: address.road,
            street_number: address.house_number,
            city: address.city.or(address.town).or(address.village),
            region: address.state,
            country: address.country,
        }
    }
}

/// HTTP reverse geocoder.
///
/// Transient failures (429, 5xx, network errors) are retried with
/// exponential back-off up to `max_retries` additional attempts.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl NominatimGeocoder {
    /// Build a geocoder rooted at `base_url` (e.g. `https://nominatim.openstreetmap.org`).
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`LocationError::Http`] if the client cannot
    /// be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, LocationError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| LocationError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LocationError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    fn reverse_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/reverse?format=jsonv2&lat={}&lon={}",
            self.base_url, coordinates.latitude, coordinates.longitude
        )
    }

    async fn fetch_once(&self, url: &str) -> Result<Option<AddressCandidate>, LocationError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        let parsed: ReverseResponse =
            serde_json::from_str(&body).map_err(|source| LocationError::Deserialize {
                context: "nominatim reverse response".to_owned(),
                source,
            })?;

        if let Some(reason) = parsed.error {
            tracing::debug!(url = %url, reason = %reason, "geocoder returned no match");
            return Ok(None);
        }

        Ok(parsed.address.map(AddressCandidate::from))
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<AddressCandidate>, LocationError> {
        let url = self.reverse_url(coordinates);
        tracing::debug!(url = %url, "reverse geocoding");
        let url = url.as_str();
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || {
            self.fetch_once(url)
        })
        .await
    }
}
