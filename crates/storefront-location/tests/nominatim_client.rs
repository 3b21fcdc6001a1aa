//! Integration tests for `NominatimGeocoder` and the workflow running on top of it.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_location::{
    Coordinates, DisplayOptions, FixedLocationProvider, LocationError, LocationStatus,
    LocationWorkflow, NominatimGeocoder, Permission, ReverseGeocoder,
};

/// 5-second timeout, descriptive UA, no retries.
fn test_geocoder(base_url: &str) -> NominatimGeocoder {
    NominatimGeocoder::new(base_url, 5, "storefront-test/0.1", 0, 0)
        .expect("failed to build test NominatimGeocoder")
}

fn springfield() -> Coordinates {
    Coordinates::new(39.78, -89.65)
}

fn springfield_body() -> serde_json::Value {
    json!({
        "place_id": 1234,
        "lat": "39.78",
        "lon": "-89.65",
        "display_name": "42, Main St, Springfield, Illinois, United States",
        "address": {
            "house_number": "42",
            "road": "Main St",
            "city": "Springfield",
            "state": "Illinois",
            "postcode": "62701",
            "country": "United States",
            "country_code": "us"
        }
    })
}

#[tokio::test]
async fn reverse_geocode_maps_address_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("lat", "39.78"))
        .and(query_param("lon", "-89.65"))
        .respond_with(ResponseTemplate::new(200).set_body_json(springfield_body()))
        .expect(1)
        .mount(&server)
        .await;

    let candidate = test_geocoder(&server.uri())
        .reverse_geocode(springfield())
        .await
        .expect("expected Ok")
        .expect("expected a candidate");

    assert_eq!(candidate.street.as_deref(), Some("Main St"));
    assert_eq!(candidate.street_number.as_deref(), Some("42"));
    assert_eq!(candidate.city.as_deref(), Some("Springfield"));
    assert_eq!(candidate.region.as_deref(), Some("Illinois"));
    assert_eq!(candidate.country.as_deref(), Some("United States"));
}

#[tokio::test]
async fn error_body_means_no_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Unable to geocode"})),
        )
        .mount(&server)
        .await;

    let result = test_geocoder(&server.uri())
        .reverse_geocode(Coordinates::new(0.0, -140.0))
        .await;
    assert!(
        matches!(result, Ok(None)),
        "expected Ok(None), got: {result:?}"
    );
}

#[tokio::test]
async fn body_without_address_means_no_candidate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"place_id": 1})))
        .mount(&server)
        .await;

    let result = test_geocoder(&server.uri())
        .reverse_geocode(springfield())
        .await;
    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}

#[tokio::test]
async fn malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let result = test_geocoder(&server.uri())
        .reverse_geocode(springfield())
        .await;
    assert!(
        matches!(result, Err(LocationError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}

#[tokio::test]
async fn forbidden_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&server.uri(), 5, "storefront-test/0.1", 3, 0)
        .expect("failed to build geocoder");
    let result = geocoder.reverse_geocode(springfield()).await;
    assert!(
        matches!(result, Err(LocationError::UnexpectedStatus { status: 403, .. })),
        "expected UnexpectedStatus(403), got: {result:?}"
    );
}

#[tokio::test]
async fn retries_after_503_and_succeeds() {
    let server = MockServer::start().await;

    // First request returns 503 (served once).
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(springfield_body()))
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&server.uri(), 5, "storefront-test/0.1", 1, 0)
        .expect("failed to build geocoder");
    let result = geocoder.reverse_geocode(springfield()).await;
    assert!(
        matches!(result, Ok(Some(_))),
        "expected candidate after retry, got: {result:?}"
    );
}

#[tokio::test]
async fn returns_error_after_exhausting_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3) // 1 initial + 2 retries
        .mount(&server)
        .await;

    let geocoder = NominatimGeocoder::new(&server.uri(), 5, "storefront-test/0.1", 2, 0)
        .expect("failed to build geocoder");
    let result = geocoder.reverse_geocode(springfield()).await;
    assert!(
        matches!(result, Err(LocationError::UnexpectedStatus { status: 429, .. })),
        "expected UnexpectedStatus(429), got: {result:?}"
    );
}

// ---------------------------------------------------------------------------
// Workflow over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn workflow_resolves_address_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(springfield_body()))
        .mount(&server)
        .await;

    let workflow = LocationWorkflow::new(
        FixedLocationProvider::new(Permission::Granted, Some(springfield())),
        test_geocoder(&server.uri()),
    );
    let resolution = workflow.resolve().await;

    assert_eq!(
        resolution.status,
        LocationStatus::Resolved("Main St 42, Springfield, Illinois, United States".to_string())
    );
    assert_eq!(
        workflow.display(&DisplayOptions::narrow()),
        "📍 Main St 42, Springfield, Illin..."
    );
}

#[tokio::test]
async fn workflow_degrades_when_geocoder_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let workflow = LocationWorkflow::new(
        FixedLocationProvider::new(Permission::Granted, Some(springfield())),
        test_geocoder(&server.uri()),
    );
    let resolution = workflow.resolve().await;

    assert!(matches!(
        resolution.status,
        LocationStatus::ResolvedCoordinatesOnly { .. }
    ));
    assert_eq!(
        workflow.display(&DisplayOptions::default()),
        "📍 Getting address..."
    );
}

#[tokio::test]
async fn workflow_denied_never_calls_geocoder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(springfield_body()))
        .expect(0)
        .mount(&server)
        .await;

    let workflow = LocationWorkflow::new(
        FixedLocationProvider::new(Permission::Denied, Some(springfield())),
        test_geocoder(&server.uri()),
    );
    assert_eq!(
        workflow.resolve().await.status,
        LocationStatus::PermissionDenied
    );
}
