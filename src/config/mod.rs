//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (intervals, timeouts, patterns)
//! - CLI option types and parsing
//! - The enumeration scope (root domains and their naming patterns)

mod constants;
mod scope;
mod types;

// Re-export all constants
pub use constants::*;
pub use scope::{build_domain_regex, normalize_root_domain, Scope};
pub use types::{Config, LogFormat, LogLevel, Opt, PausePolicy};
