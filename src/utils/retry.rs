//! Error retriability.

use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;
use crate::error_handling::FetchError;

/// Determines if a fetch failure is worth another attempt.
///
/// # Retriable Errors
///
/// - Network timeouts and connection failures
/// - Request errors that never reached the provider
/// - Server errors (5xx HTTP status codes)
/// - Rate limiting (429 Too Many Requests)
///
/// # Non-Retriable Errors
///
/// - Client errors (4xx HTTP status codes, except 429)
/// - Builder, redirect and decode errors
pub(crate) fn is_retriable_error(error: &FetchError) -> bool {
    match error {
        FetchError::Status { status } => is_retriable_status(*status),
        FetchError::Request(e) => {
            if let Some(status) = e.status() {
                return is_retriable_status(status.as_u16());
            }
            if e.is_builder() || e.is_redirect() || e.is_decode() {
                return false;
            }
            e.is_timeout() || e.is_connect() || e.is_request() || e.is_body()
        }
    }
}

fn is_retriable_status(status: u16) -> bool {
    if status == HTTP_STATUS_TOO_MANY_REQUESTS {
        return true;
    }
    (500..600).contains(&status)
}
