//! Main application entry point (CLI binary).
//!
//! Parses arguments, initializes logging and hands off to the library.
//! Discoveries go to stdout (or `--output`); the summary goes to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use pdns_worker::initialization::init_logger_with;
use pdns_worker::{run_enumeration, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_enumeration(config).await {
        Ok(report) => {
            eprintln!(
                "✅ Queried {} domain{} ({} completed) in {:.1}s: {} addresses, {} names{}",
                report.queries.len(),
                if report.queries.len() == 1 { "" } else { "s" },
                report.completed(),
                report.elapsed_seconds,
                report.addresses,
                report.names,
                if report.interrupted { " (interrupted)" } else { "" }
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("pdns_worker error: {:#}", e);
            process::exit(1);
        }
    }
}
