//! Fetching raw payloads from the passive-DNS provider.
//!
//! This module provides:
//! - The `Fetcher` seam used by query loops (one GET per target, raw text back)
//! - `HttpFetcher`, the `reqwest`-backed implementation
//! - `Endpoints`, which builds forward and reverse lookup URLs
//!
//! A fetch in flight is never interrupted by a stop signal: it runs to
//! completion or failure.

mod endpoints;
mod http;

use async_trait::async_trait;

use crate::error_handling::FetchError;

pub use endpoints::Endpoints;
pub use http::HttpFetcher;

/// Issues a single GET and returns the response body as text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`. Any failure is terminal for the calling phase.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
