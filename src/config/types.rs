use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub sets: SetsConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

impl Config {
    /// Archive used to skip already-rendered cards.
    ///
    /// A non-empty `CARD_ARCHIVE_PATH` environment variable takes precedence
    /// over the configured path.
    pub fn archive_path(&self) -> Option<PathBuf> {
        match std::env::var("CARD_ARCHIVE_PATH") {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => self.archive.path.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamingConfig {
    /// Filename template; `NAME`, `ARTIST`, `SET` and `NUMBER` are replaced
    /// in that order.
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    "NAME [SET] {NUMBER}".to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Overwrite existing files instead of numbering new ones
    #[serde(default)]
    pub overwrite: bool,

    /// Skip the scraped source entirely and only use the card API
    #[serde(default)]
    pub scryfall_only: bool,

    /// Fall back to the card API when the scraped source has no match (default: true)
    #[serde(default = "default_true")]
    pub scryfall_fallback: bool,

    /// Download the full card image from the card API instead of the art crop
    #[serde(default)]
    pub scryfall_full: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            scryfall_only: false,
            scryfall_fallback: true,
            scryfall_full: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_mtgpics_dir")]
    pub mtgpics_dir: String,

    #[serde(default = "default_scryfall_dir")]
    pub scryfall_dir: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Failure log name, written as `<log_dir>/<failed_log>.txt`
    #[serde(default = "default_failed_log")]
    pub failed_log: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}
fn default_mtgpics_dir() -> String {
    "mtgpics".to_string()
}
fn default_scryfall_dir() -> String {
    "scryfall".to_string()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}
fn default_failed_log() -> String {
    "failed".to_string()
}

impl PathsConfig {
    /// Root folder for images from the scraped source.
    pub fn mtgpics_root(&self) -> PathBuf {
        self.output_dir.join(&self.mtgpics_dir)
    }

    /// Root folder for images from the card API.
    pub fn scryfall_root(&self) -> PathBuf {
        self.output_dir.join(&self.scryfall_dir)
    }

    pub fn failure_log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}.txt", self.failed_log))
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            mtgpics_dir: default_mtgpics_dir(),
            scryfall_dir: default_scryfall_dir(),
            log_dir: default_log_dir(),
            failed_log: default_failed_log(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SetsConfig {
    /// Canonical set code -> scraped-source set code
    #[serde(default)]
    pub replace: HashMap<String, String>,

    /// Additional set codes treated as promotional listings
    #[serde(default)]
    pub extra_promo_sets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    /// Uniqueness mode for card API searches ("cards", "art" or "prints")
    #[serde(default = "default_unique")]
    pub unique: String,

    #[serde(default = "default_true")]
    pub include_extras: bool,
}

fn default_unique() -> String {
    "art".to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            unique: default_unique(),
            include_extras: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_rate")]
    pub requests_per_second: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_mtgpics_url")]
    pub mtgpics_url: String,

    #[serde(default = "default_scryfall_url")]
    pub scryfall_url: String,

    #[serde(default = "default_moxfield_url")]
    pub moxfield_url: String,
}

fn default_timeout() -> u64 {
    30
}
fn default_rate() -> u32 {
    10
}
fn default_user_agent() -> String {
    format!("cardforged/{}", env!("CARGO_PKG_VERSION"))
}
fn default_mtgpics_url() -> String {
    "https://www.mtgpics.com".to_string()
}
fn default_scryfall_url() -> String {
    "https://api.scryfall.com".to_string()
}
fn default_moxfield_url() -> String {
    "https://api.moxfield.com".to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            requests_per_second: default_rate(),
            user_agent: default_user_agent(),
            mtgpics_url: default_mtgpics_url(),
            scryfall_url: default_scryfall_url(),
            moxfield_url: default_moxfield_url(),
        }
    }
}
