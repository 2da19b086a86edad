// Shared helpers for integration tests.
//
// Provides an in-memory fetcher keyed by URL and builders for workers and
// configs pointed at a local mock provider.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pdns_worker::error_handling::{FetchError, ProcessingStats};
use pdns_worker::events::{event_channel, Event};
use pdns_worker::fetch::{Endpoints, Fetcher};
use pdns_worker::{Config, LogFormat, LogLevel, Scope, Worker, WorkerResources, WorkerSettings};
use tokio::sync::mpsc::UnboundedReceiver;

#[allow(dead_code)]
pub const BASE_URL: &str = "http://pdns.test";

/// One provider record as a JSON line.
#[allow(dead_code)]
pub fn record(name: &str, data: &str, rtype: &str) -> String {
    format!(
        r#"{{"rrname":"{}","rrdata":"{}","rrtype":"{}"}}"#,
        name, data, rtype
    )
}

/// In-memory provider. Unknown URLs fail with a 404.
#[allow(dead_code)]
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(mut self, domain: &str, lines: &[String]) -> Self {
        self.pages
            .insert(format!("{}/forward/{}", BASE_URL, domain), lines.join("\n"));
        self
    }

    pub fn reverse(mut self, address: &str, lines: &[String]) -> Self {
        self.pages
            .insert(format!("{}/reverse/{}", BASE_URL, address), lines.join("\n"));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reverse_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|url| url.contains("/reverse/"))
            .count()
    }
}

#[async_trait]
impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or(FetchError::Status { status: 404 })
    }
}

#[allow(dead_code)]
pub struct TestWorker {
    pub worker: Worker,
    pub fetcher: Arc<MapFetcher>,
    pub stats: Arc<ProcessingStats>,
    pub events: UnboundedReceiver<Event>,
}

#[allow(dead_code)]
/// Builds a worker over `fetcher` for the given root domains.
pub fn test_worker(fetcher: MapFetcher, domains: &[&str], settings: WorkerSettings) -> TestWorker {
    let fetcher = Arc::new(fetcher);
    let stats = Arc::new(ProcessingStats::new());
    let (sink, events) = event_channel();
    let worker = Worker::new(
        settings,
        WorkerResources {
            scope: Arc::new(Scope::new(domains).expect("valid test domains")),
            endpoints: Endpoints::new(BASE_URL).expect("valid test base URL"),
            fetcher: fetcher.clone(),
            sink: Arc::new(sink),
            stats: Arc::clone(&stats),
        },
    );
    TestWorker {
        worker,
        fetcher,
        stats,
        events,
    }
}

/// Everything currently buffered on the event channel.
#[allow(dead_code)]
pub fn drain(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Config for an end-to-end run against a mock provider at `base_url`.
#[allow(dead_code)]
pub fn test_config(base_url: String, domains: &[&str]) -> Config {
    Config {
        domains: domains.iter().map(|d| d.to_string()).collect(),
        base_url,
        reverse_interval: Duration::from_millis(10),
        timeout_seconds: 5,
        user_agent: "pdns_worker_test/1.0".to_string(),
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        ..Config::default()
    }
}
