//! Retry with exponential back-off and jitter for geocoder requests.

use std::future::Future;
use std::time::Duration;

use crate::error::LocationError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429 and 5xx.
///
/// **Not retriable:** other statuses, malformed bodies, bad base URLs.
pub(crate) fn is_retriable(err: &LocationError) -> bool {
    match err {
        LocationError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        LocationError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        LocationError::Deserialize { .. } | LocationError::InvalidBaseUrl { .. } => false,
    }
}

/// Upper bound on a single back-off sleep.
const MAX_DELAY: Duration = Duration::from_secs(10);

/// Un-jittered delay before retry number `attempt` (1-based): `base × 2^(attempt-1)`,
/// capped at [`MAX_DELAY`].
fn backoff_delay(attempt: u32, backoff_base_ms: u64) -> Duration {
    let factor = 1u64 << attempt.saturating_sub(1).min(10);
    Duration::from_millis(backoff_base_ms.saturating_mul(factor)).min(MAX_DELAY)
}

/// Scales `delay` by a random factor in `[0.75, 1.25)`.
fn jittered(delay: Duration) -> Duration {
    delay.mul_f64(rand::random::<f64>() * 0.5 + 0.75)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors,
/// sleeping [`backoff_delay`] ± 25 % between attempts.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, LocationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LocationError>>,
{
    let mut attempt = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) && attempt < max_retries => err,
            Err(err) => return Err(err),
        };
        attempt += 1;
        let delay = jittered(backoff_delay(attempt, backoff_base_ms));
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "geocoder transient error, retrying after back-off"
        );
        tokio::time::sleep(delay).await;
    }
}
