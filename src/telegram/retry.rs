//! Retry and backoff utilities for Bot API operations.
//!
//! This module provides functions for classifying transient errors and
//! computing exponential backoff delays.

use std::time::Duration;

/// Default number of retry attempts for flood-control (429) responses.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Default number of retry attempts for transient network errors.
pub const DEFAULT_NETWORK_RETRIES: u32 = 3;

/// Base delay for exponential backoff (1 second).
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Maximum delay cap for exponential backoff (60 seconds).
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(60);

/// Determine if a reqwest error is a transient network error that should be retried.
///
/// Returns true for connection errors, timeouts, interrupted bodies and
/// gateway-style 5xx statuses.
pub fn is_transient_network_error(error: &reqwest::Error) -> bool {
    if error.is_connect() || error.is_timeout() || error.is_body() {
        return true;
    }

    error.status().is_some_and(is_gateway_status)
}

/// 502 Bad Gateway, 503 Service Unavailable or 504 Gateway Timeout.
///
/// These come from the proxy in front of the Bot API rather than the API
/// itself, so they carry no response envelope.
pub fn is_gateway_status(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 502..=504)
}

/// Calculate exponential backoff delay with jitter.
///
/// Uses the formula: min(base * 2^attempt + jitter, max_delay)
/// where jitter is half the base, capped at 500ms.
pub fn calculate_backoff(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt));
    let jitter_ms = (base.as_millis() as u64).min(1000);
    let jitter = Duration::from_millis(jitter_ms / 2);
    exponential.saturating_add(jitter).min(max)
}

/// Delay before retrying a rate-limited request.
///
/// Uses the server-provided `retry_after` when present, otherwise backoff.
pub fn rate_limit_delay(
    retry_after_secs: Option<u64>,
    attempt: u32,
    base: Duration,
    max: Duration,
) -> Duration {
    match retry_after_secs {
        Some(secs) => Duration::from_secs(secs).min(max),
        None => calculate_backoff(attempt, base, max),
    }
}
