//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::query::{QueryReport, QueryStatus};

/// Prints error and info counters to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

/// Number of reports with the given status.
pub fn count_status(reports: &[QueryReport], status: QueryStatus) -> usize {
    reports.iter().filter(|r| r.status == status).count()
}

/// Prints one line per domain and a one-line summary of the run.
pub fn print_query_summary(
    reports: &[QueryReport],
    addresses: usize,
    names: usize,
    elapsed_seconds: f64,
) {
    for report in reports {
        info!(
            "   {}: {:?}, {} addresses, {}/{} reverse lookups ok, {} names",
            report.domain,
            report.status,
            report.addresses,
            report.reverse_fetches - report.reverse_failures,
            report.reverse_fetches,
            report.names
        );
    }
    info!(
        "✅ Queried {} domain{} ({} completed, {} cancelled, {} failed, {} skipped): {} unique addresses, {} unique names in {:.1}s",
        reports.len(),
        if reports.len() == 1 { "" } else { "s" },
        count_status(reports, QueryStatus::Completed),
        count_status(reports, QueryStatus::Cancelled),
        count_status(reports, QueryStatus::ForwardFailed),
        count_status(reports, QueryStatus::Skipped),
        addresses,
        names,
        elapsed_seconds
    );
}
