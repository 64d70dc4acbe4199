//! Page and image fetch collaborators.
//!
//! The resolver and the downloader only see the two narrow traits below.
//! Both fail silently: a network or HTTP failure becomes `None` / `false`
//! and is logged by the implementation, never propagated.
//!
//! - [`http`] -- reqwest-backed implementation with rate limiting and retry.

pub mod http;

use std::path::Path;

use async_trait::async_trait;

pub use http::HttpFetcher;

/// Fetches HTML pages from the scraped source.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Return the page body, or `None` if the page could not be fetched.
    async fn fetch_page(&self, url: &str) -> Option<String>;
}

/// Downloads images to disk.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download `url` to `dest`, returning `true` on success.
    ///
    /// The parent directory of `dest` must already exist.
    async fn fetch_image(&self, url: &str, dest: &Path) -> bool;
}
