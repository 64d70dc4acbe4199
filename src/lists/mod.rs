//! Input lists: where the records to download come from.
//!
//! - [`normalize`] -- plain-text list cleanup and line parsing.
//! - [`scryfall`] -- card API search and single-card lookups.
//! - [`moxfield`] -- deck documents.
//! - [`json_walk`] -- key search used to pull cards out of deck documents.

pub mod json_walk;
pub mod moxfield;
pub mod normalize;
pub mod scryfall;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::archive::filter_archive;
use crate::card::CardRecord;
use crate::config::Config;
use cardforged_common::Error;

pub use moxfield::MoxfieldClient;
pub use normalize::{normalize_lines, parse_line, ListEntry};
pub use scryfall::ScryfallClient;

/// Shapes accepted for a records file.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsDocument {
    Many(Vec<CardRecord>),
    Page { data: Vec<CardRecord> },
    One(CardRecord),
}

/// Parse records from JSON: an array, a search result page (`{"data": [...]}`)
/// or a single record.
pub fn records_from_json(json: &str) -> serde_json::Result<Vec<CardRecord>> {
    Ok(match serde_json::from_str(json)? {
        RecordsDocument::Many(records) => records,
        RecordsDocument::Page { data } => data,
        RecordsDocument::One(record) => vec![record],
    })
}

/// Read a records file.
pub fn load_records(path: &Path) -> Result<Vec<CardRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {:?}", path))?;
    records_from_json(&content)
        .with_context(|| format!("Failed to parse records file: {:?}", path))
}

/// Resolve every line of a text list through the card API.
///
/// Lines that cannot be resolved are logged and skipped.
pub async fn resolve_lines(client: &ScryfallClient, lines: &[String]) -> Vec<CardRecord> {
    let mut records = Vec::with_capacity(lines.len());
    for line in normalize_lines(lines) {
        let entry = parse_line(&line);
        match client.resolve_entry(&entry).await {
            Ok(record) => records.push(record),
            Err(e) if is_no_match(&e) => tracing::warn!("Could not find '{}'", line),
            Err(e) => tracing::warn!("Lookup failed for '{}': {:#}", line, e),
        }
    }
    records
}

fn is_no_match(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<Error>(), Some(Error::NoMatchFound(_)))
}

/// Drop records already present in the configured archive, if any.
///
/// A configured archive that does not exist is an error.
pub fn apply_archive_filter(config: &Config, records: Vec<CardRecord>) -> Result<Vec<CardRecord>> {
    match config.archive_path() {
        Some(path) => {
            let before = records.len();
            let kept = filter_archive(&path, &records)?;
            tracing::info!(
                "Archive {} already holds {} of {} card(s)",
                path.display(),
                before - kept.len(),
                before
            );
            Ok(kept)
        }
        None => Ok(records),
    }
}
