//! `reqwest`-backed fetcher.

use async_trait::async_trait;
use tokio_retry::RetryIf;

use super::Fetcher;
use crate::error_handling::{get_retry_strategy, FetchError};
use crate::utils::is_retriable_error;

/// Fetches provider payloads over HTTP.
///
/// With `attempts == 1` (the default) every failure is returned as-is. With
/// more attempts, retriable failures (timeouts, connect errors, 5xx, 429) are
/// retried with exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    attempts: usize,
}

impl HttpFetcher {
    /// Wraps an already configured client.
    pub fn new(client: reqwest::Client, attempts: usize) -> Self {
        HttpFetcher {
            client,
            attempts: attempts.max(1),
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if self.attempts == 1 {
            return self.fetch_once(url).await;
        }

        let strategy = get_retry_strategy(self.attempts - 1);
        RetryIf::spawn(
            strategy,
            || {
                log::trace!("GET {}", url);
                self.fetch_once(url)
            },
            is_retriable_error,
        )
        .await
    }
}
