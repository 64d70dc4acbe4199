//! Append-only log of cards the downloader could not fetch.
//!
//! One card label per line. The file and its directory are created on first
//! write; existing content is never truncated.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cardforged_common::ImageSource;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a failed download.
    ///
    /// `source` names the action that failed in the console echo
    /// (`MTGP FAILED: ...`, `SCRY FAILED: ...`); `echo = false` writes the
    /// line without telling the console.
    pub fn record(&self, label: &str, source: ImageSource, echo: bool) {
        if echo {
            warn!("{} FAILED: {}", source.action(), label);
        }
        if let Err(e) = self.append(label) {
            warn!(path = %self.path.display(), error = %e, "Could not write failure log");
        }
    }

    fn append(&self, label: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open failure log: {}", self.path.display()))?;
        writeln!(file, "{label}")
            .with_context(|| format!("Failed to append to failure log: {}", self.path.display()))?;
        Ok(())
    }

    /// Labels recorded so far, oldest first.
    pub fn entries(&self) -> Vec<String> {
        fs::read_to_string(&self.path)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_creates_directory_and_appends() {
        let dir = TempDir::new().unwrap();
        let log = FailureLog::new(dir.path().join("logs").join("failed.txt"));

        log.record("Damnation (MH2) 85", ImageSource::Mtgpics, false);
        log.record("Fire (APC) 128", ImageSource::Scryfall, true);

        assert_eq!(
            log.entries(),
            vec!["Damnation (MH2) 85".to_string(), "Fire (APC) 128".to_string()]
        );
    }

    #[test]
    fn test_entries_of_missing_log_is_empty() {
        let dir = TempDir::new().unwrap();
        let log = FailureLog::new(dir.path().join("none.txt"));
        assert!(log.entries().is_empty());
    }
}
