//! HTTP fetcher backed by [`reqwest`].
//!
//! Features:
//! - Token-bucket rate limiting shared by every request via [`governor`].
//! - Automatic retry on HTTP 429 with `Retry-After` header support (max 3 retries).
//! - Configurable request timeout and user agent.
//! - A 404 surfaces as [`Error::NoMatchFound`], a transport failure as
//!   [`Error::SourceUnavailable`].
//! - JSON helpers for the card API and deck clients.

use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{ImageFetcher, PageFetcher};
use crate::config::NetworkConfig;
use cardforged_common::Error;

const MAX_RETRIES: u32 = 3;

/// Shared HTTP client for every external source.
///
/// # Examples
///
/// ```no_run
/// use cardforged::config::NetworkConfig;
/// use cardforged::fetch::HttpFetcher;
///
/// let fetcher = HttpFetcher::new(&NetworkConfig::default()).unwrap();
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    rate_limiter: governor::RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
}

impl HttpFetcher {
    /// Create a fetcher from the network section of the configuration.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Execute a GET request with rate limiting and 429-retry logic.
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let mut retries = 0u32;
        loop {
            self.rate_limiter.until_ready().await;

            let resp = self
                .client
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| Error::unavailable(format!("{url}: {e}")))?;

            if resp.status() == StatusCode::NOT_FOUND {
                return Err(Error::no_match(url.to_string()).into());
            }

            if resp.status() == StatusCode::TOO_MANY_REQUESTS && retries < MAX_RETRIES {
                retries += 1;
                let wait = resp
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                warn!(retry = retries, wait_secs = wait, url, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_secs(wait)).await;
                continue;
            }

            return resp
                .error_for_status()
                .with_context(|| format!("Request returned error: {url}"));
        }
    }

    /// GET a page and return its body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.get(url, &[])
            .await?
            .text()
            .await
            .with_context(|| format!("Failed to read body: {url}"))
    }

    /// GET a JSON document with optional query parameters.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.get(url, query)
            .await?
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse JSON from {url}"))
    }

    /// Download an image to `dest`.
    ///
    /// Text responses (an HTML error page served with status 200) and empty
    /// bodies are rejected so they never land on disk as `.jpg` files.
    pub async fn download_to(&self, url: &str, dest: &Path) -> Result<()> {
        let resp = self.get(url, &[]).await?;

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if content_type.starts_with("text/") {
            anyhow::bail!("Expected an image from {url}, got {content_type}");
        }

        let bytes = resp
            .bytes()
            .await
            .with_context(|| format!("Failed to read image body: {url}"))?;
        if bytes.is_empty() {
            anyhow::bail!("Empty image body from {url}");
        }

        tokio::fs::write(dest, &bytes)
            .await
            .with_context(|| format!("Failed to write image: {}", dest.display()))?;
        Ok(())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.get_text(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(url, error = %e, "Page fetch failed");
                None
            }
        }
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch_image(&self, url: &str, dest: &Path) -> bool {
        match self.download_to(url, dest).await {
            Ok(()) => true,
            Err(e) => {
                debug!(url, dest = %dest.display(), error = %e, "Image download failed");
                false
            }
        }
    }
}
