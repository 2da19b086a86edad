//! Error type definitions.
//!
//! This module defines all error and info types used throughout the worker.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured root domains could not be turned into a scope.
    #[error("Scope initialization error: {0}")]
    ScopeError(#[from] ScopeError),

    /// The provider base URL is not an absolute http(s) URL.
    #[error("Invalid provider base URL '{url}': {reason}")]
    BaseUrlError {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Error types for scope construction.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// No root domain was configured.
    #[error("No root domains configured")]
    NoDomains,

    /// A configured root domain is not a valid DNS name.
    #[error("Invalid root domain: '{0}'")]
    InvalidDomain(String),

    /// The naming pattern for a root domain failed to compile.
    #[error("Failed to build naming pattern for {domain}: {source}")]
    Pattern {
        /// Root domain the pattern was built for
        domain: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },
}

/// A failed fetch from the passive-DNS provider.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider answered with a non-success status.
    #[error("HTTP status {status}")]
    Status {
        /// Response status code
        status: u16,
    },

    /// Transport-level failure (connect, timeout, body read, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),
}

/// Categories of fetch failures, used for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    /// The request could not be built
    HttpRequestBuilderError,
    /// Redirect policy violated
    HttpRequestRedirectError,
    /// Request timed out
    HttpRequestTimeoutError,
    /// Request failed before a response arrived
    HttpRequestRequestError,
    /// Connection could not be established
    HttpRequestConnectError,
    /// Response body could not be read
    HttpRequestBodyError,
    /// Response body could not be decoded
    HttpRequestDecodeError,
    /// Any other transport failure or unmapped status
    HttpRequestOtherError,
    /// 429 Too Many Requests
    HttpRequestTooManyRequests,
    // Specific HTTP status code errors
    /// 400 Bad Request
    HttpRequestBadRequest,
    /// 403 Forbidden
    HttpRequestForbidden,
    /// 404 Not Found
    HttpRequestNotFound,
    /// 500 Internal Server Error
    HttpRequestInternalServerError,
    /// 502 Bad Gateway
    HttpRequestBadGateway,
    /// 503 Service Unavailable
    HttpRequestServiceUnavailable,
    /// 504 Gateway Timeout
    HttpRequestGatewayTimeout,
}

/// Notable events of a query loop that are not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// Forward lookup issued
    ForwardLookup,
    /// Reverse lookup issued
    ReverseLookup,
    /// Address emitted
    AddressDiscovered,
    /// Name emitted
    NameDiscovered,
    /// Forward lookup failed
    DomainAbandoned,
    /// Reverse lookup failed, address skipped
    ReverseSkipped,
    /// Stop signal cut the reverse phase short
    QueryCancelled,
    /// Upstream work notification acknowledged
    WorkNotification,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable label used in the statistics report.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests",
            ErrorType::HttpRequestBadRequest => "Bad Request (400)",
            ErrorType::HttpRequestForbidden => "Forbidden (403)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestInternalServerError => "Internal Server Error (500)",
            ErrorType::HttpRequestBadGateway => "Bad Gateway (502)",
            ErrorType::HttpRequestServiceUnavailable => "Service Unavailable (503)",
            ErrorType::HttpRequestGatewayTimeout => "Gateway Timeout (504)",
        }
    }
}

impl InfoType {
    /// Human-readable label used in the statistics report.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::ForwardLookup => "Forward lookups",
            InfoType::ReverseLookup => "Reverse lookups",
            InfoType::AddressDiscovered => "Addresses discovered",
            InfoType::NameDiscovered => "Names discovered",
            InfoType::DomainAbandoned => "Domains abandoned after forward lookup failure",
            InfoType::ReverseSkipped => "Reverse lookups skipped after failure",
            InfoType::QueryCancelled => "Query loops cancelled",
            InfoType::WorkNotification => "Work notifications acknowledged",
        }
    }
}
