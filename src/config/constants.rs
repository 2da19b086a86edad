//! Configuration constants.
//!
//! This module defines the constants used as defaults throughout the worker,
//! including provider endpoints, pacing intervals and activity windows.

use std::time::Duration;

/// Base URL of the passive-DNS provider queried by default.
///
/// Forward lookups are issued against `<base>/forward/<domain>` and reverse
/// lookups against `<base>/reverse/<address>`.
pub const DEFAULT_BASE_URL: &str = "https://freeapi.robtex.com/pdns";

/// Name reported as the `source` of every discovery.
pub const DEFAULT_WORKER_NAME: &str = "Robtex";

/// Tag attached to every discovery produced by an API-backed data source.
pub const API_SOURCE_TAG: &str = "api";

/// Default pause between two reverse lookups, in milliseconds.
pub const DEFAULT_REVERSE_INTERVAL_MS: u64 = 500;

/// Interval between two reverse lookups for the same root domain.
pub const REVERSE_LOOKUP_INTERVAL: Duration = Duration::from_millis(DEFAULT_REVERSE_INTERVAL_MS);

/// Smallest pacing interval accepted. A zero period would make the ticker spin.
pub const MIN_PACING_INTERVAL: Duration = Duration::from_millis(1);

/// How long a single `set_active()` call keeps the worker reported as active.
pub const ACTIVITY_WINDOW: Duration = Duration::from_secs(10);

/// Capacity of the inbound work-notification channel.
pub const REQUEST_BUFFER_SIZE: usize = 100;

/// Root domains processed at the same time by one worker (1 = sequential).
pub const DOMAIN_CONCURRENCY: usize = 1;

/// HTTP request timeout in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 20;

/// Total fetch attempts per URL. 1 disables retries entirely.
pub const FETCH_ATTEMPTS: usize = 1;

// Retry backoff, only used when more than one fetch attempt is configured.
// Delays are RETRY_FACTOR * RETRY_BACKOFF_BASE^n ms: 500ms, 1s, 2s, 4s, then capped.

/// Exponential base of the retry backoff
pub const RETRY_BACKOFF_BASE: u64 = 2;
/// Multiplier applied to each backoff step, in milliseconds
pub const RETRY_FACTOR: u64 = 250;
/// Upper bound of a single retry delay
pub const RETRY_MAX_DELAY_SECS: u64 = 5;

/// HTTP 429 (Too Many Requests)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Record types that map a name to an address.
pub const ADDRESS_RECORD_TYPES: &[&str] = &["A", "AAAA"];

/// One or more DNS labels, each followed by a dot.
///
/// The escaped root domain is appended to this to build the per-domain
/// naming pattern.
pub const SUBDOMAIN_LABELS_PATTERN: &str =
    r"(([a-zA-Z0-9]{1}|[_a-zA-Z0-9]{1}[_a-zA-Z0-9-]{0,61}[a-zA-Z0-9]{1})[.]{1})+";

/// URL-escape artefacts that sometimes prefix names scraped out of text.
pub const NAME_STRIP_PATTERN: &str = r"^(u[0-9a-f]{4}|20|22|25|2b|2f|3d|3a|40)";

/// How often progress is logged while a run is in flight.
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);
