//! Shared helpers for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error_handling::FetchError;
use crate::events::Event;
use crate::fetch::{Endpoints, Fetcher};

pub(crate) const TEST_BASE_URL: &str = "http://pdns.test";

pub(crate) fn test_endpoints() -> Endpoints {
    Endpoints::new(TEST_BASE_URL).unwrap()
}

pub(crate) fn forward_url(domain: &str) -> String {
    format!("{}/forward/{}", TEST_BASE_URL, domain)
}

pub(crate) fn reverse_url(address: &str) -> String {
    format!("{}/reverse/{}", TEST_BASE_URL, address)
}

pub(crate) fn a_record(name: &str, address: &str) -> String {
    format!(
        r#"{{"rrname":"{}","rrdata":"{}","rrtype":"A"}}"#,
        name, address
    )
}

/// Fetcher answering from a fixed table and recording every URL it was asked for.
#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    responses: HashMap<String, Result<String, u16>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), Ok(body.into()));
        self
    }

    pub(crate) fn status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), Err(status));
        self
    }

    pub(crate) fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn reverse_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|url| url.contains("/reverse/"))
            .count()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.responses.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status { status: *status }),
            // Unscripted URLs behave like a provider with no data for them
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}

pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
