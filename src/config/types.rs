//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    ACTIVITY_WINDOW, API_SOURCE_TAG, DEFAULT_BASE_URL, DEFAULT_REVERSE_INTERVAL_MS,
    DEFAULT_USER_AGENT, DEFAULT_WORKER_NAME, DOMAIN_CONCURRENCY, FETCH_ATTEMPTS,
    HTTP_TIMEOUT_SECS, REQUEST_BUFFER_SIZE, REVERSE_LOOKUP_INTERVAL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What a stop signal does while the worker is paused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PausePolicy {
    /// The stop is held back until the next resume. Query loops are still
    /// cancelled straight away.
    AwaitResume,
    /// The stop ends the signal processor even while paused.
    StopPreempts,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use pdns_worker::Config;
///
/// let config = Config {
///     domains: vec!["example.com".to_string()],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Root domains to enumerate
    pub domains: Vec<String>,

    /// Provider base URL (forward and reverse paths are appended)
    pub base_url: String,

    /// Worker name, reported as the source of every discovery
    pub worker_name: String,

    /// Tag attached to every discovery
    pub source_tag: String,

    /// Pause between two reverse lookups of the same root domain
    pub reverse_interval: Duration,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Total attempts per fetch (1 disables retries)
    pub fetch_attempts: usize,

    /// Root domains processed concurrently
    pub domain_concurrency: usize,

    /// Capacity of the inbound work-notification channel
    pub request_buffer: usize,

    /// How long one activity mark keeps the worker reported as active
    pub activity_window: Duration,

    /// Handling of stop signals that arrive while paused
    pub pause_policy: PausePolicy,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Where discoveries are written as JSON lines (stdout when `None`)
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            worker_name: DEFAULT_WORKER_NAME.to_string(),
            source_tag: API_SOURCE_TAG.to_string(),
            reverse_interval: REVERSE_LOOKUP_INTERVAL,
            timeout_seconds: HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_attempts: FETCH_ATTEMPTS,
            domain_concurrency: DOMAIN_CONCURRENCY,
            request_buffer: REQUEST_BUFFER_SIZE,
            activity_window: ACTIVITY_WINDOW,
            pause_policy: PausePolicy::AwaitResume,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            output: None,
        }
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "pdns_worker",
    version,
    about = "Discovers addresses and subdomains of root domains through a passive-DNS provider"
)]
pub struct Opt {
    /// Root domains to enumerate
    #[arg(value_name = "DOMAIN", required = true)]
    pub domains: Vec<String>,

    /// Provider base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Milliseconds between two reverse lookups
    #[arg(long, default_value_t = DEFAULT_REVERSE_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Total attempts per fetch (1 disables retries)
    #[arg(long, default_value_t = FETCH_ATTEMPTS)]
    pub fetch_attempts: usize,

    /// Root domains processed concurrently
    #[arg(long, default_value_t = DOMAIN_CONCURRENCY)]
    pub domain_concurrency: usize,

    /// What a stop signal does while paused
    #[arg(long, value_enum, default_value_t = PausePolicy::AwaitResume)]
    pub pause_policy: PausePolicy,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Write discoveries to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            domains: opt.domains,
            base_url: opt.base_url,
            reverse_interval: Duration::from_millis(opt.interval_ms),
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent,
            fetch_attempts: opt.fetch_attempts,
            domain_concurrency: opt.domain_concurrency,
            pause_policy: opt.pause_policy,
            log_level: opt.log_level,
            log_format: opt.log_format,
            output: opt.output,
            ..Default::default()
        }
    }
}
