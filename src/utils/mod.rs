//! Utility functions.
//!
//! This module provides:
//! - Error retriability determination for the HTTP fetcher

mod retry;

pub(crate) use retry::is_retriable_error;
