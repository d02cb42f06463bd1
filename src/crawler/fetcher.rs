//! HTTP fetcher with bounded exponential backoff
//!
//! Only connection-level and timeout failures are retried. An HTTP error
//! status is a completed fetch: the body comes back to the caller, who must
//! handle absent expected elements. Retrying error statuses could mask a
//! genuine "page does not exist" signal from the source, so the scope stays
//! narrow.

use crate::config::ScraperConfig;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Retry schedule: `max_attempts` total attempts, sleeping
/// `backoff_base * 2^k` after the k-th failure
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_base: Duration,
}

impl RetryPolicy {
    /// The sleep intervals between attempts, in order
    ///
    /// A limit of 5 attempts with a 2s base yields 2, 4, 8, 16 seconds.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let base = self.backoff_base;
        (0..self.max_attempts.saturating_sub(1))
            .map(move |k| base.saturating_mul(1u32 << k.min(31)))
    }
}

impl From<&ScraperConfig> for RetryPolicy {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        }
    }
}

/// Builds the HTTP client shared by listing and detail fetches
///
/// # Arguments
///
/// * `user_agent` - The User-Agent header value for every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A client paired with a retry policy
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Fetches `url` and returns the response body
    ///
    /// `context` names the page for log lines ("listing page 3",
    /// "launch detail 4721"); it is an explicit parameter so the retry loop
    /// carries no knowledge of the caller's pagination state.
    ///
    /// Returns `None` once retries are exhausted, or immediately when the
    /// request failed in a way retrying cannot help. The caller treats
    /// `None` as "page unavailable", never as a fatal error.
    pub async fn fetch(&self, url: &str, context: &str) -> Option<String> {
        let mut delays = self.policy.delays();
        for attempt in 1..=self.policy.max_attempts {
            match self.client.get(url).send().await {
                Ok(response) => match response.text().await {
                    Ok(body) => return Some(body),
                    Err(e) => {
                        warn!("failed to read body for {}: {}", context, e);
                        return None;
                    }
                },
                Err(e) if e.is_connect() || e.is_timeout() => {
                    warn!("{} on {}", e, context);
                    match delays.next() {
                        Some(delay) => {
                            info!("Retrying {} (attempt {})", context, attempt);
                            sleep(delay).await;
                        }
                        None => break,
                    }
                }
                Err(e) => {
                    warn!("request for {} failed: {}", context, e);
                    return None;
                }
            }
        }

        warn!(
            "giving up on {} after {} attempts",
            context, self.policy.max_attempts
        );
        None
    }
}
