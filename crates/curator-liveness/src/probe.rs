//! # URL Probe
//!
//! Issues one GET per URL (per freshness window) and maps the outcome to
//! an alert message. Timeouts are bounded by the client's request timeout,
//! so a stuck remote server cannot wedge a worker.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::UrlCache;

/// Default per-request timeout for liveness probes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A liveness checker over a shared HTTP client and verdict cache.
#[derive(Debug, Clone)]
pub struct UrlProbe {
    http: reqwest::Client,
    cache: Arc<UrlCache>,
}

impl UrlProbe {
    /// Build a probe with its own HTTP client and a fresh cache.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            cache: Arc::new(UrlCache::new()),
        })
    }

    /// Build a probe over an existing client and cache (shared across a
    /// worker pool).
    pub fn with_cache(http: reqwest::Client, cache: Arc<UrlCache>) -> Self {
        Self { http, cache }
    }

    /// The shared verdict cache.
    pub fn cache(&self) -> &Arc<UrlCache> {
        &self.cache
    }

    /// Check one URL. Returns `None` when the URL is alive, or the alert
    /// message otherwise. Verdicts are served from the cache within its
    /// freshness window.
    pub async fn verdict(&self, url: &str) -> Option<String> {
        if let Some(cached) = self.cache.fresh_verdict(url) {
            tracing::debug!(url, "serving liveness verdict from cache");
            return cached;
        }

        tracing::debug!(url, "probing URL");
        let verdict = self.fetch_verdict(url).await;
        self.cache.store(url, verdict.clone());
        verdict
    }

    async fn fetch_verdict(&self, url: &str) -> Option<String> {
        match self.http.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_client_error() || status.is_server_error() {
                    Some(format!(
                        "The web server responded with a bad status code: {} {}",
                        status.as_u16(),
                        status.canonical_reason().unwrap_or("Unknown"),
                    ))
                } else {
                    None
                }
            }
            Err(error) if error.is_timeout() => Some(format!(
                "A timeout occurred when trying to connect to the web server: {error}"
            )),
            Err(error) => Some(format!(
                "An error occurred when trying to connect to the web server: {error}"
            )),
        }
    }
}
