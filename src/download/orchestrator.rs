//! Per-face download attempts.
//!
//! Each face walks the same sequence:
//!
//! ```text
//! INIT -> TRY_PRIMARY -> DONE_PRIMARY
//!                     -> TRY_SECONDARY -> DONE_SECONDARY
//!                                      -> FAILED
//! ```
//!
//! The primary attempt uses the scraped source and is skipped when the run is
//! restricted to the card API. The secondary attempt uses the card API and is
//! skipped when fallback is disabled. Every terminal state is logged: a
//! failure is written to the failure log and echoed; a secondary success after
//! a primary miss is written to the failure log without an echo.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cardforged_common::{ImageSource, Result};
use serde::Serialize;

use super::failure_log::FailureLog;
use crate::card::{CardPlan, CardRecord, FacePlan};
use crate::config::Config;
use crate::fetch::{ImageFetcher, PageFetcher};
use crate::mtgpics::{MtgpicsLookup, MtgpicsSource};
use crate::naming::PathNamer;

/// Outcome of one face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub success: bool,
    /// `Name (SET) number`
    pub label: String,
    /// Where the image was (or would have been) saved.
    pub path: PathBuf,
    /// Source the image came from; `None` on failure.
    pub source: Option<ImageSource>,
}

impl DownloadResult {
    fn done(face: &FacePlan, path: PathBuf, source: ImageSource) -> Self {
        Self {
            success: true,
            label: face.label.clone(),
            path,
            source: Some(source),
        }
    }

    fn failed(face: &FacePlan, path: PathBuf) -> Self {
        Self {
            success: false,
            label: face.label.clone(),
            path,
            source: None,
        }
    }
}

enum Attempt {
    Done(PathBuf),
    Missed(PathBuf),
}

/// Drives downloads for one card at a time.
pub struct DownloadOrchestrator {
    config: Arc<Config>,
    pages: Arc<dyn PageFetcher>,
    images: Arc<dyn ImageFetcher>,
    namer: PathNamer,
    failures: FailureLog,
    echo_failures: bool,
}

impl DownloadOrchestrator {
    pub fn new(
        config: Arc<Config>,
        pages: Arc<dyn PageFetcher>,
        images: Arc<dyn ImageFetcher>,
    ) -> Self {
        let namer = PathNamer::from_config(&config);
        let failures = FailureLog::new(config.paths.failure_log_path());
        Self {
            config,
            pages,
            images,
            namer,
            failures,
            echo_failures: true,
        }
    }

    /// Suppress the console echo of failures. The failure log is still written.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.echo_failures = !quiet;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn failure_log(&self) -> &FailureLog {
        &self.failures
    }

    /// Download every face of a record, front first.
    ///
    /// With `logging = false` nothing is written to the failure log.
    ///
    /// # Errors
    ///
    /// Returns [`cardforged_common::Error::MalformedRecord`] when the record
    /// lacks the face data its layout requires. Download failures are never
    /// errors; they show up as unsuccessful results.
    pub async fn download(&self, record: &CardRecord, logging: bool) -> Result<Vec<DownloadResult>> {
        let plan = CardPlan::from_record(record, self.config.download.scryfall_full)?;
        Ok(self.download_plan(&plan, logging).await)
    }

    /// Download every face of an already resolved plan.
    pub async fn download_plan(&self, plan: &CardPlan, logging: bool) -> Vec<DownloadResult> {
        let lookup = if self.config.download.scryfall_only {
            None
        } else {
            Some(
                MtgpicsSource::new(&self.config, self.pages.as_ref())
                    .lookup(plan)
                    .await,
            )
        };

        let mut results = Vec::with_capacity(plan.faces.len());
        for face in &plan.faces {
            let result = self.download_face(plan, face, lookup.as_ref(), logging).await;
            results.push(result);
        }
        results
    }

    async fn download_face(
        &self,
        plan: &CardPlan,
        face: &FacePlan,
        lookup: Option<&MtgpicsLookup>,
        logging: bool,
    ) -> DownloadResult {
        let download = &self.config.download;

        // TRY_PRIMARY
        let primary = match lookup {
            Some(lookup) => {
                let url = lookup.face_url(face.side);
                let root = self.config.paths.mtgpics_root();
                match self.attempt(url.as_deref(), &root, plan, face).await {
                    Attempt::Done(path) => {
                        tracing::info!("MTGP DONE: {}", face.label);
                        return DownloadResult::done(face, path, ImageSource::Mtgpics);
                    }
                    Attempt::Missed(path) => Some(path),
                }
            }
            None => None,
        };

        // TRY_SECONDARY
        let fallback_enabled = primary.is_none() || download.scryfall_fallback;
        let secondary = if fallback_enabled {
            let root = self.config.paths.scryfall_root();
            match self.attempt(face.fallback_url.as_deref(), &root, plan, face).await {
                Attempt::Done(path) => {
                    tracing::info!("SCRYFALL: {}", face.label);
                    if logging && primary.is_some() {
                        self.failures.record(&face.label, ImageSource::Mtgpics, false);
                    }
                    return DownloadResult::done(face, path, ImageSource::Scryfall);
                }
                Attempt::Missed(path) => Some(path),
            }
        } else {
            None
        };

        // FAILED
        let action = if primary.is_some() {
            ImageSource::Mtgpics
        } else {
            ImageSource::Scryfall
        };
        if logging {
            self.failures.record(&face.label, action, self.echo_failures);
        }
        let path = primary.or(secondary).unwrap_or_default();
        DownloadResult::failed(face, path)
    }

    /// Fetch `url` into `<root>/<face dir>/<filename>`.
    async fn attempt(
        &self,
        url: Option<&str>,
        root: &Path,
        plan: &CardPlan,
        face: &FacePlan,
    ) -> Attempt {
        let dir = if face.dir.is_empty() {
            root.to_path_buf()
        } else {
            root.join(face.dir)
        };
        let path = self
            .namer
            .build_path(&dir, &face.name, &face.artist, &plan.set, &plan.number);

        let Some(url) = url.filter(|u| !u.is_empty()) else {
            tracing::debug!(label = %face.label, "No image URL");
            return Attempt::Missed(path);
        };

        if let Err(e) = tokio::fs::create_dir_all(&dir).await {
            tracing::warn!(dir = %dir.display(), error = %e, "Could not create output directory");
            return Attempt::Missed(path);
        }

        if self.images.fetch_image(url, &path).await {
            Attempt::Done(path)
        } else {
            Attempt::Missed(path)
        }
    }
}
