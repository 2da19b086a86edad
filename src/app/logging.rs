//! Progress logging.

use std::time::Instant;

use log::info;

use crate::error_handling::{InfoType, ProcessingStats};
use crate::worker::WorkerStatus;

/// Logs one progress line: worker state, lookups issued and discoveries so far.
pub fn log_progress(
    worker: &str,
    start_time: Instant,
    status: &WorkerStatus,
    stats: &ProcessingStats,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let lookups = stats.get_info_count(InfoType::ForwardLookup)
        + stats.get_info_count(InfoType::ReverseLookup);
    let rate = if elapsed_secs > 0.0 {
        lookups as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "{} [{}{}]: {} lookups in {:.1}s (~{:.2}/sec), {} addresses, {} names, {} errors",
        worker,
        status.state(),
        if status.is_active() { ", active" } else { "" },
        lookups,
        elapsed_secs,
        rate,
        stats.get_info_count(InfoType::AddressDiscovered),
        stats.get_info_count(InfoType::NameDiscovered),
        stats.total_errors()
    );
}
