//! Per-root-domain query loop.
//!
//! One run walks three phases for a single root domain:
//! 1. Forward lookup: one fetch; every first-seen address is emitted at once.
//!    A failed fetch abandons the domain.
//! 2. Reverse lookups: one fetch per address, paced by a `RateLimiter`. A stop
//!    signal aborts the pacing wait and ends the phase early; a failed fetch
//!    only skips its address.
//! 3. Extraction: the aggregated reverse-lookup text is scanned with the
//!    domain's naming pattern and every cleaned match is emitted.
//!
//! Cancellation is only observed inside the pacing wait. Fetches in flight
//! always run to completion.

mod names;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::config::Scope;
use crate::error_handling::{update_error_stats, FetchError, InfoType, ProcessingStats};
use crate::events::{DiscoveredAddress, DiscoveredName, EventSink};
use crate::fetch::{Endpoints, Fetcher};
use crate::rate_limiter::{RateLimiter, Tick};
use crate::records::records;
use crate::worker::WorkerStatus;

pub use names::{clean_name, ReverseNames};

/// How a domain's query loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// All phases ran to the end
    Completed,
    /// The reverse phase was cut short by a stop signal
    Cancelled,
    /// The forward lookup failed; nothing else ran
    ForwardFailed,
    /// The domain is not part of the scope and was never queried
    Skipped,
}

/// Summary of one domain's query loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    /// Root domain
    pub domain: String,
    /// How the loop ended
    pub status: QueryStatus,
    /// Unique addresses from the forward lookup
    pub addresses: usize,
    /// Reverse fetches issued
    pub reverse_fetches: usize,
    /// Reverse fetches that failed
    pub reverse_failures: usize,
    /// Names emitted after extraction
    pub names: usize,
}

impl QueryReport {
    fn new(domain: &str, status: QueryStatus) -> Self {
        QueryReport {
            domain: domain.to_string(),
            status,
            addresses: 0,
            reverse_fetches: 0,
            reverse_failures: 0,
            names: 0,
        }
    }
}

/// Identity stamped on every discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentity {
    /// Worker name, reported as `source`
    pub name: String,
    /// Data source tag, reported as `tag`
    pub tag: String,
}

/// Everything a query loop needs, shared by all domains of one worker.
pub struct QueryLoop {
    source: SourceIdentity,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn EventSink>,
    endpoints: Endpoints,
    status: Arc<WorkerStatus>,
    stats: Arc<ProcessingStats>,
    cancel: CancellationToken,
    reverse_interval: Duration,
}

impl QueryLoop {
    /// Wires a loop to its collaborators. `cancel` aborts reverse pacing.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: SourceIdentity,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn EventSink>,
        endpoints: Endpoints,
        status: Arc<WorkerStatus>,
        stats: Arc<ProcessingStats>,
        cancel: CancellationToken,
        reverse_interval: Duration,
    ) -> Self {
        QueryLoop {
            source,
            fetcher,
            sink,
            endpoints,
            status,
            stats,
            cancel,
            reverse_interval,
        }
    }

    /// Runs the loop for `domain` using its pattern from `scope`.
    ///
    /// A domain reached after a stop still runs its forward phase; the stop
    /// ends it at the first pacing wait.
    pub async fn run_in_scope(&self, scope: &Scope, domain: &str) -> QueryReport {
        match scope.domain_regex(domain) {
            Some(pattern) => self.run(domain, pattern).await,
            None => {
                warn!("{}: {} is not in scope", self.source.name, domain);
                QueryReport::new(domain, QueryStatus::Skipped)
            }
        }
    }

    /// Runs all three phases for `domain`.
    pub async fn run(&self, domain: &str, pattern: &Regex) -> QueryReport {
        let mut report = QueryReport::new(domain, QueryStatus::Completed);

        let Some(addresses) = self.forward_phase(domain).await else {
            self.stats.increment_info(InfoType::DomainAbandoned);
            report.status = QueryStatus::ForwardFailed;
            return report;
        };
        report.addresses = addresses.len();

        let reverse_names = self.reverse_phase(&addresses, &mut report).await;

        self.status.set_active();
        for name in reverse_names.extract(pattern) {
            self.sink.emit_name(DiscoveredName {
                name,
                domain: domain.to_string(),
                tag: self.source.tag.clone(),
                source: self.source.name.clone(),
            });
            self.stats.increment_info(InfoType::NameDiscovered);
            report.names += 1;
        }

        info!(
            "{}: {} done ({:?}): {} addresses, {} reverse lookups ({} failed), {} names",
            self.source.name,
            domain,
            report.status,
            report.addresses,
            report.reverse_fetches,
            report.reverse_failures,
            report.names
        );
        report
    }

    /// Fetches the forward records and emits each first-seen address.
    /// Returns `None` if the fetch failed.
    async fn forward_phase(&self, domain: &str) -> Option<Vec<String>> {
        let url = self.endpoints.forward(domain);
        self.stats.increment_info(InfoType::ForwardLookup);
        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                self.log_failure(&url, &e);
                return None;
            }
        };

        let mut seen = HashSet::new();
        let mut addresses = Vec::new();
        for record in records(&page).filter(|r| r.is_address()) {
            if !seen.insert(record.data.clone()) {
                continue;
            }
            self.sink.emit_address(DiscoveredAddress {
                domain: domain.to_string(),
                address: record.data.clone(),
                tag: self.source.tag.clone(),
                source: self.source.name.clone(),
            });
            self.stats.increment_info(InfoType::AddressDiscovered);
            addresses.push(record.data);
        }
        Some(addresses)
    }

    /// Issues one paced reverse fetch per address and gathers the hostnames.
    async fn reverse_phase(&self, addresses: &[String], report: &mut QueryReport) -> ReverseNames {
        let mut reverse_names = ReverseNames::default();
        let mut limiter = RateLimiter::new(self.reverse_interval);

        for address in addresses {
            self.status.set_active();

            if limiter.wait(&self.cancel).await == Tick::Aborted {
                debug!(
                    "{}: reverse lookups for {} cancelled",
                    self.source.name, report.domain
                );
                self.stats.increment_info(InfoType::QueryCancelled);
                report.status = QueryStatus::Cancelled;
                break;
            }

            let url = self.endpoints.reverse(address);
            report.reverse_fetches += 1;
            self.stats.increment_info(InfoType::ReverseLookup);
            match self.fetcher.fetch(&url).await {
                Ok(page) => {
                    for record in records(&page) {
                        reverse_names.push(record.name);
                    }
                }
                Err(e) => {
                    self.log_failure(&url, &e);
                    self.stats.increment_info(InfoType::ReverseSkipped);
                    report.reverse_failures += 1;
                }
            }
        }

        reverse_names
    }

    fn log_failure(&self, url: &str, error: &FetchError) {
        update_error_stats(&self.stats, error);
        warn!("{}: {}: {}", self.source.name, url, error);
    }
}
