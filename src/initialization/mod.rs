//! Application initialization and resource setup.
//!
//! Builds the shared resources of a run from a [`Config`]: the logger, the
//! scope of root domains, the provider endpoints and the HTTP fetcher.

mod client;
mod logger;

use std::sync::Arc;

use crate::config::{Config, Scope};
use crate::error_handling::InitializationError;
use crate::fetch::{Endpoints, Fetcher, HttpFetcher};

pub use client::init_client;
pub use logger::init_logger_with;

/// Normalizes the configured root domains and compiles one naming pattern each.
///
/// # Errors
///
/// Returns `InitializationError::ScopeError` if no valid domain was given or a
/// pattern fails to compile.
pub fn init_scope(config: &Config) -> Result<Arc<Scope>, InitializationError> {
    let scope = Scope::new(&config.domains)?;
    Ok(Arc::new(scope))
}

/// Validates the provider base URL.
pub fn init_endpoints(config: &Config) -> Result<Endpoints, InitializationError> {
    Endpoints::new(&config.base_url)
}

/// Builds the reqwest-backed fetcher, retrying only if `fetch_attempts > 1`.
pub fn init_fetcher(config: &Config) -> Result<Arc<dyn Fetcher>, InitializationError> {
    let client = init_client(config)?;
    Ok(Arc::new(HttpFetcher::new(client, config.fetch_attempts)))
}
