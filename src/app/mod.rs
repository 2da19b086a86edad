//! Main application modules.
//!
//! Progress logging, output, shutdown handling and statistics printing used
//! by a run.

pub mod logging;
pub mod output;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use output::write_discoveries;
pub use shutdown::shutdown_gracefully;
pub use statistics::{count_status, print_error_statistics, print_query_summary};
