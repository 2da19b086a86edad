//! pdns_worker library: subdomain enumeration from a passive-DNS provider
//!
//! A [`Worker`] queries the provider's forward records of each root domain,
//! reports every address found, looks each address up in reverse at a fixed
//! pace and reports every subdomain name the reverse results mention. It can be
//! paused, resumed and stopped at any time; a stop aborts any pending pacing
//! wait.
//!
//! # Example
//!
//! ```no_run
//! use pdns_worker::{run_enumeration, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domains: vec!["example.com".into()],
//!     ..Default::default()
//! };
//!
//! let report = run_enumeration(config).await?;
//! println!("{} addresses, {} names", report.addresses, report.names);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod events;
pub mod fetch;
pub mod initialization;
pub mod query;
mod rate_limiter;
mod records;
#[cfg(test)]
mod test_helpers;
mod utils;
pub mod worker;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt, PausePolicy, Scope};
pub use events::{DiscoveredAddress, DiscoveredName, Event, EventSink};
pub use query::{QueryReport, QueryStatus};
pub use rate_limiter::{RateLimiter, Tick};
pub use records::{parse_records, QueryRecord};
pub use run::{run_enumeration, EnumerationReport};
pub use worker::{Worker, WorkerResources, WorkerSettings, WorkerState};

// Internal run module (wires the worker, collector and output together)
mod run {
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        count_status, log_progress, print_error_statistics, print_query_summary,
        shutdown_gracefully, write_discoveries,
    };
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::error_handling::ProcessingStats;
    use crate::events::{event_channel, Collector, Event};
    use crate::initialization::{init_endpoints, init_fetcher, init_scope};
    use crate::query::{QueryReport, QueryStatus};
    use crate::worker::{Worker, WorkerResources, WorkerSettings};

    /// Results of an enumeration run.
    #[derive(Debug, Clone)]
    pub struct EnumerationReport {
        /// One report per root domain
        pub queries: Vec<QueryReport>,
        /// Unique addresses discovered
        pub addresses: usize,
        /// Unique names discovered
        pub names: usize,
        /// All unique discoveries in first-seen order
        pub events: Vec<Event>,
        /// True if the run was cut short by Ctrl-C
        pub interrupted: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl EnumerationReport {
        /// Number of root domains whose query loop ran to the end.
        pub fn completed(&self) -> usize {
            count_status(&self.queries, QueryStatus::Completed)
        }
    }

    /// Enumerates subdomains of every configured root domain.
    ///
    /// Starts one worker, waits for all its query loops (or Ctrl-C, which stops
    /// the worker), shuts it down, and writes the de-duplicated discoveries as
    /// JSON lines to `config.output` or stdout.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No valid root domain was configured
    /// - The base URL is invalid or the HTTP client cannot be built
    /// - The discoveries cannot be written
    pub async fn run_enumeration(config: Config) -> Result<EnumerationReport> {
        let scope = init_scope(&config).context("Failed to initialize scope")?;
        let endpoints = init_endpoints(&config).context("Failed to initialize endpoints")?;
        let fetcher = init_fetcher(&config).context("Failed to initialize HTTP fetcher")?;
        let stats = Arc::new(ProcessingStats::new());

        let (sink, rx) = event_channel();
        let collector = tokio::spawn(Collector::new(rx).run());

        let worker = Worker::new(
            WorkerSettings::from(&config),
            WorkerResources {
                scope,
                endpoints,
                fetcher,
                sink: Arc::new(sink),
                stats: Arc::clone(&stats),
            },
        );

        let start_time = std::time::Instant::now();
        info!(
            "Enumerating {} via {} (reverse lookups every {:?})",
            config.domains.join(", "),
            config.base_url,
            config.reverse_interval
        );
        worker.start();

        let cancel = CancellationToken::new();
        let logging_task = {
            let cancel = cancel.clone();
            let status = worker.status();
            let stats = Arc::clone(&stats);
            let name = worker.name().to_string();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(LOGGING_INTERVAL);
                interval.tick().await;
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = interval.tick() => log_progress(&name, start_time, &status, &stats),
                    }
                }
            })
        };

        let mut interrupted = false;
        let queries = {
            let wait = worker.wait_for_queries();
            tokio::pin!(wait);
            tokio::select! {
                reports = &mut wait => reports,
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted, stopping {}", worker.name());
                    interrupted = true;
                    worker.stop();
                    wait.await
                }
            }
        };

        let discoveries = shutdown_gracefully(worker, collector, cancel, Some(logging_task)).await;
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        print_error_statistics(&stats);
        print_query_summary(
            &queries,
            discoveries.address_count(),
            discoveries.name_count(),
            elapsed_seconds,
        );

        write_discoveries(discoveries.events(), config.output.as_deref())
            .context("Failed to write discoveries")?;

        Ok(EnumerationReport {
            addresses: discoveries.address_count(),
            names: discoveries.name_count(),
            events: discoveries.events().to_vec(),
            queries,
            interrupted,
            elapsed_seconds,
        })
    }
}
