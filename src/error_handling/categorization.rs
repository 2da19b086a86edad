//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize fetch errors and configure the
//! optional retry strategy of the HTTP fetcher.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::stats::ProcessingStats;
use super::types::{ErrorType, FetchError};

/// Creates an exponential backoff retry strategy yielding `retries` delays.
///
/// Delays start at 500ms, double on every retry and are capped at
/// `RETRY_MAX_DELAY_SECS`.
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_BACKOFF_BASE)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(retries)
}

/// Categorizes an HTTP status code into an `ErrorType`.
pub fn categorize_status(status: u16) -> ErrorType {
    match status {
        400 => ErrorType::HttpRequestBadRequest,
        403 => ErrorType::HttpRequestForbidden,
        404 => ErrorType::HttpRequestNotFound,
        429 => ErrorType::HttpRequestTooManyRequests,
        500 => ErrorType::HttpRequestInternalServerError,
        502 => ErrorType::HttpRequestBadGateway,
        503 => ErrorType::HttpRequestServiceUnavailable,
        504 => ErrorType::HttpRequestGatewayTimeout,
        _ => ErrorType::HttpRequestOtherError,
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes any fetch failure into an `ErrorType`.
pub fn categorize_fetch_error(error: &FetchError) -> ErrorType {
    match error {
        FetchError::Status { status } => categorize_status(*status),
        FetchError::Request(e) => categorize_reqwest_error(e),
    }
}

/// Records a fetch failure in the processing statistics.
pub fn update_error_stats(stats: &ProcessingStats, error: &FetchError) {
    stats.increment_error(categorize_fetch_error(error));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_retry_strategy_length() {
        assert_eq!(get_retry_strategy(0).count(), 0);
        assert_eq!(get_retry_strategy(3).count(), 3);
    }

    #[test]
    fn test_get_retry_strategy_initial_delay() {
        let first = get_retry_strategy(1).next().unwrap();
        assert_eq!(first, Duration::from_millis(500));
    }

    #[test]
    fn test_get_retry_strategy_capped() {
        let max = Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS);
        for delay in get_retry_strategy(10) {
            assert!(delay <= max, "delay {:?} exceeds cap", delay);
        }
    }

    #[test]
    fn test_categorize_status() {
        assert_eq!(categorize_status(404), ErrorType::HttpRequestNotFound);
        assert_eq!(categorize_status(429), ErrorType::HttpRequestTooManyRequests);
        assert_eq!(
            categorize_status(503),
            ErrorType::HttpRequestServiceUnavailable
        );
        assert_eq!(categorize_status(418), ErrorType::HttpRequestOtherError);
    }

    #[test]
    fn test_categorize_fetch_error() {
        assert_eq!(
            categorize_fetch_error(&FetchError::Status { status: 502 }),
            ErrorType::HttpRequestBadGateway
        );
        assert_eq!(
            categorize_fetch_error(&FetchError::Status { status: 404 }),
            ErrorType::HttpRequestNotFound
        );
    }

    #[test]
    fn test_update_error_stats() {
        let stats = ProcessingStats::new();
        update_error_stats(&stats, &FetchError::Status { status: 500 });
        update_error_stats(&stats, &FetchError::Status { status: 500 });
        assert_eq!(
            stats.get_error_count(ErrorType::HttpRequestInternalServerError),
            2
        );
        assert_eq!(stats.total_errors(), 2);
    }
}
