//! Image downloads.
//!
//! - [`orchestrator`] -- per-face attempt sequence for one card.
//! - [`failure_log`] -- append-only log of misses.
//!
//! [`BatchRunner`] feeds records to the orchestrator one after another.
//! Nothing in a batch aborts it: malformed records and failed faces are
//! logged and counted.

pub mod failure_log;
pub mod orchestrator;

use std::sync::Arc;

use cardforged_common::ImageSource;
use serde::Serialize;

use crate::card::CardRecord;

pub use failure_log::FailureLog;
pub use orchestrator::{DownloadOrchestrator, DownloadResult};

/// Totals for a finished batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Faces saved from either source.
    pub downloaded: usize,
    /// Faces (or malformed records) that produced no image.
    pub failed: usize,
    pub results: Vec<DownloadResult>,
}

impl BatchSummary {
    fn push(&mut self, result: DownloadResult) {
        if result.success {
            self.downloaded += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// Faces that came from the given source.
    pub fn from_source(&self, source: ImageSource) -> usize {
        self.results
            .iter()
            .filter(|r| r.source == Some(source))
            .count()
    }
}

/// Sequential batch driver.
pub struct BatchRunner {
    orchestrator: Arc<DownloadOrchestrator>,
}

impl BatchRunner {
    pub fn new(orchestrator: Arc<DownloadOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Download every record in order.
    pub async fn run(&self, records: &[CardRecord]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        tracing::info!("Downloading {} card(s)", records.len());

        for record in records {
            match self.orchestrator.download(record, true).await {
                Ok(results) => results.into_iter().for_each(|r| summary.push(r)),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", record.label(), e);
                    self.orchestrator
                        .failure_log()
                        .record(&record.label(), ImageSource::Mtgpics, false);
                    summary.push(DownloadResult {
                        success: false,
                        label: record.label(),
                        path: Default::default(),
                        source: None,
                    });
                }
            }
        }

        tracing::info!(
            downloaded = summary.downloaded,
            failed = summary.failed,
            "Batch finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetch::{ImageFetcher, PageFetcher};
    use async_trait::async_trait;
    use std::path::Path;
    use tempfile::TempDir;

    /// Every page is missing; only card API images download.
    struct FallbackOnly;

    #[async_trait]
    impl PageFetcher for FallbackOnly {
        async fn fetch_page(&self, _url: &str) -> Option<String> {
            None
        }
    }

    #[async_trait]
    impl ImageFetcher for FallbackOnly {
        async fn fetch_image(&self, url: &str, dest: &Path) -> bool {
            url.starts_with("https://scry.test/") && std::fs::write(dest, b"jpeg").is_ok()
        }
    }

    fn record(name: &str, layout: &str, with_image: bool) -> CardRecord {
        CardRecord {
            name: name.into(),
            set: "tst".into(),
            collector_number: "1".into(),
            layout: layout.into(),
            image_uris: with_image.then(|| crate::card::ImageUris {
                large: None,
                art_crop: Some(format!("https://scry.test/{name}.jpg")),
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_batch_counts_and_keeps_going() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.output_dir = dir.path().join("out");
        config.paths.log_dir = dir.path().join("logs");

        let fetcher = Arc::new(FallbackOnly);
        let orchestrator = DownloadOrchestrator::new(Arc::new(config), fetcher.clone(), fetcher);
        let runner = BatchRunner::new(Arc::new(orchestrator));

        let records = vec![
            record("Alpha", "normal", true),
            record("Broken", "transform", false),
            record("Gamma", "normal", false),
        ];
        let summary = runner.run(&records).await;

        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.results.len(), 3);
        assert_eq!(summary.from_source(ImageSource::Scryfall), 1);
        assert_eq!(summary.results[1].label, "Broken (TST) 1");
    }
}
