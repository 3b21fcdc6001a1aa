use thiserror::Error;

/// Errors from the reverse-geocoding collaborator.
///
/// None of these are fatal to the workflow; it degrades to a
/// coordinates-only status instead.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
