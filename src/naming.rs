//! Destination filenames.
//!
//! The naming template replaces `NAME`, `ARTIST`, `SET` and `NUMBER` one after
//! another, so a field value containing a later placeholder (an artist called
//! `SET`) is substituted again.

use std::path::{Path, PathBuf};

use cardforged_common::paths::with_image_extension;

use crate::config::Config;

/// Builds sanitized, collision-free image paths.
#[derive(Debug, Clone)]
pub struct PathNamer {
    template: String,
    overwrite: bool,
}

impl PathNamer {
    pub fn new(template: impl Into<String>, overwrite: bool) -> Self {
        Self {
            template: template.into(),
            overwrite,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.naming.template.clone(), config.download.overwrite)
    }

    /// Filename stem for a face, before sanitizing.
    pub fn render(&self, name: &str, artist: &str, set: &str, number: &str) -> String {
        self.template
            .replace("NAME", name)
            .replace("ARTIST", artist)
            .replace("SET", &set.to_uppercase())
            .replace("NUMBER", number)
    }

    /// Full destination path under `dir`.
    ///
    /// Unless overwriting is enabled, an existing file pushes the name to
    /// `"<stem> (1).jpg"`, `"<stem> (2).jpg"`, and so on. The filesystem is
    /// probed on every call.
    pub fn build_path(
        &self,
        dir: &Path,
        name: &str,
        artist: &str,
        set: &str,
        number: &str,
    ) -> PathBuf {
        let stem = sanitize_filename::sanitize(self.render(name, artist, set, number));
        let path = dir.join(with_image_extension(&stem));
        if self.overwrite {
            return path;
        }

        let mut candidate = path;
        let mut counter = 0u32;
        while candidate.is_file() {
            counter += 1;
            candidate = dir.join(with_image_extension(&format!("{stem} ({counter})")));
        }
        candidate
    }
}
