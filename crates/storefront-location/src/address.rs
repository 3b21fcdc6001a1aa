use crate::types::AddressCandidate;

/// Rendered when a candidate exists but carries no usable component.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Render a geocoder candidate as `"street number, city, region, country"`.
///
/// Missing components are skipped along with their separator. Blank strings
/// count as missing. A street number without a street is dropped.
#[must_use]
pub fn format_address(candidate: &AddressCandidate) -> String {
    let present = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    let street = present(&candidate.street).map(|street| {
        match present(&candidate.street_number) {
            Some(number) => format!("{street} {number}"),
            None => street,
        }
    });

    let parts: Vec<String> = [
        street,
        present(&candidate.city),
        present(&candidate.region),
        present(&candidate.country),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}
