//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, scope, fetch)
//! - Fetch failure categorization
//! - Processing statistics tracking (errors and info metrics)
//! - Retry strategy configuration for the HTTP fetcher

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_fetch_error, categorize_reqwest_error, categorize_status, get_retry_strategy,
    update_error_stats,
};
pub use stats::ProcessingStats;
pub use types::{ErrorType, FetchError, InfoType, InitializationError, ScopeError};
