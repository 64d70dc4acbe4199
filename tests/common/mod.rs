//! Shared test harness for integration tests.
//!
//! Provides [`FakeSite`], an in-memory stand-in for both image sources, plus
//! builders for card records and the scraped-source HTML pages.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use cardforged::card::{CardRecord, FaceData, ImageUris};
use cardforged::config::Config;
use cardforged::download::DownloadOrchestrator;
use cardforged::fetch::{ImageFetcher, PageFetcher};

pub const SITE: &str = "https://mtgpics.test";
pub const API_IMAGES: &str = "https://cards.test";

const ROW_STYLE: &str = "display:block;margin:0px 2px 0px 2px;border-top:1px #cccccc dotted;";
const THUMB_STYLE: &str = "display:block;border:4px black solid;cursor:pointer;";

// ---------------------------------------------------------------------------
// Fake fetcher
// ---------------------------------------------------------------------------

/// Pages and images served from memory. Every request is recorded.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    images: Vec<String>,
    pub page_requests: Mutex<Vec<String>>,
    pub image_requests: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, path: &str, html: impl Into<String>) -> Self {
        self.pages.insert(format!("{SITE}/{path}"), html.into());
        self
    }

    /// Make an image URL downloadable.
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    pub fn downloaded(&self) -> Vec<String> {
        self.image_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch_page(&self, url: &str) -> Option<String> {
        self.page_requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned()
    }
}

#[async_trait]
impl ImageFetcher for FakeSite {
    async fn fetch_image(&self, url: &str, dest: &Path) -> bool {
        if !self.images.iter().any(|u| u == url) {
            return false;
        }
        self.image_requests.lock().unwrap().push(url.to_string());
        std::fs::write(dest, url.as_bytes()).is_ok()
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Output and log directories in a temp dir, wired to a [`FakeSite`].
pub struct TestHarness {
    pub dir: TempDir,
    pub config: Config,
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut config = Config::default();
        config.paths.output_dir = dir.path().join("out");
        config.paths.log_dir = dir.path().join("logs");
        config.network.mtgpics_url = SITE.to_string();
        Self { dir, config }
    }

    pub fn orchestrator(&self, site: Arc<FakeSite>) -> DownloadOrchestrator {
        DownloadOrchestrator::new(Arc::new(self.config.clone()), site.clone(), site)
    }

    pub fn out(&self, relative: &str) -> std::path::PathBuf {
        self.dir.path().join("out").join(relative)
    }
}

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

pub fn api_image(tag: &str) -> Option<ImageUris> {
    Some(ImageUris {
        large: Some(format!("{API_IMAGES}/large/{tag}.jpg")),
        art_crop: Some(format!("{API_IMAGES}/art_crop/{tag}.jpg")),
    })
}

pub fn single_card(name: &str, set: &str, number: &str, artist: &str) -> CardRecord {
    CardRecord {
        name: name.into(),
        set: set.into(),
        set_name: format!("Set {}", set.to_uppercase()),
        set_type: "expansion".into(),
        collector_number: number.into(),
        artist: artist.into(),
        layout: "normal".into(),
        type_line: "Sorcery".into(),
        image_uris: api_image(&format!("{set}{number}")),
        ..Default::default()
    }
}

pub fn transform_card(front: &str, back: &str, set: &str, number: &str) -> CardRecord {
    CardRecord {
        name: format!("{front} // {back}"),
        set: set.into(),
        set_name: format!("Set {}", set.to_uppercase()),
        set_type: "expansion".into(),
        collector_number: number.into(),
        artist: "Someone".into(),
        layout: "transform".into(),
        type_line: "Creature // Creature".into(),
        card_faces: Some(vec![
            FaceData {
                name: Some(front.into()),
                artist: Some("Front Artist".into()),
                image_uris: api_image(&format!("{set}{number}a")),
            },
            FaceData {
                name: Some(back.into()),
                artist: Some("Back Artist".into()),
                image_uris: api_image(&format!("{set}{number}b")),
            },
        ]),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// HTML builders
// ---------------------------------------------------------------------------

/// Card page linking to checklist `set_id` and showing the given thumbnails.
pub fn card_page(set_id: Option<u32>, thumbs: &[&str]) -> String {
    let link = set_id
        .map(|id| format!(r#"<td width="170" align="center"><a href="set?set={id}">Set</a></td>"#))
        .unwrap_or_default();
    let imgs: String = thumbs
        .iter()
        .map(|src| format!(r#"<img style="{THUMB_STYLE}" src="{src}">"#))
        .collect();
    format!("<html><body><table><tr>{link}</tr></table>{imgs}</body></html>")
}

/// Checklist row: (number, name text, reference code, artist).
pub fn checklist(rows: &[(&str, &str, &str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(number, name, code, artist)| {
            format!(
                r#"<div style="{ROW_STYLE}"><table><tr>
                    <td>{number}</td><td></td>
                    <td><a href="card?ref={code}">{name}</a></td>
                    <td></td><td></td><td></td><td>{artist}</td>
                </tr></table></div>"#
            )
        })
        .collect();
    format!("<html><body>{rows}</body></html>")
}
