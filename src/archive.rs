//! Pre-filter against an archive of finished renders.
//!
//! A render is stored as `<face name> [<SET>] {<number>}.<ext>` anywhere in
//! the zip. A record is dropped when every face it would download is already
//! present.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use cardforged_common::paths::entry_stem;
use cardforged_common::{Error, Result};

use crate::card::{CardPlan, CardRecord};

/// Entry stems of every file in the archive.
pub fn archive_stems(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Err(Error::ArchiveMissing(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let archive = zip::ZipArchive::new(file)
        .map_err(|e| Error::invalid_input(format!("Failed to read archive {}: {e}", path.display())))?;

    Ok(archive
        .file_names()
        .map(|name| entry_stem(name).to_string())
        .collect())
}

/// Expected archive stem of one face, or `None` when the collector number has
/// no digits.
pub fn expected_stem(face_name: &str, set: &str, number: &str) -> Option<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    let number: u64 = digits.parse().ok()?;
    Some(format!("{} [{}] {{{}}}", face_name, set.to_uppercase(), number))
}

/// Whether every face of the record is already in the archive.
///
/// Malformed records are never considered archived.
pub fn is_archived(record: &CardRecord, stems: &HashSet<String>) -> bool {
    let Ok(plan) = CardPlan::from_record(record, false) else {
        return false;
    };
    plan.faces.iter().all(|face| {
        expected_stem(&face.name, &record.set, &record.collector_number)
            .is_some_and(|stem| stems.contains(&stem))
    })
}

/// Records not yet present in the archive, in input order.
///
/// # Errors
///
/// [`Error::ArchiveMissing`] if `path` does not exist; the caller must not
/// continue without the filter.
pub fn filter_archive(path: &Path, records: &[CardRecord]) -> Result<Vec<CardRecord>> {
    let stems = archive_stems(path)?;
    let kept: Vec<CardRecord> = records
        .iter()
        .filter(|record| !is_archived(record, &stems))
        .cloned()
        .collect();
    tracing::debug!(
        archive = %path.display(),
        entries = stems.len(),
        kept = kept.len(),
        dropped = records.len() - kept.len(),
        "Archive filter"
    );
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::FaceData;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, entries: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        for entry in entries {
            zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
            zip.write_all(b"jpeg").unwrap();
        }
        zip.finish().unwrap();
    }

    fn card(name: &str, number: &str) -> CardRecord {
        CardRecord {
            name: name.into(),
            set: "mh2".into(),
            collector_number: number.into(),
            layout: "normal".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_expected_stem() {
        assert_eq!(
            expected_stem("Damnation", "mh2", "085").as_deref(),
            Some("Damnation [MH2] {85}")
        );
        assert_eq!(
            expected_stem("Damnation", "mh2", "85★").as_deref(),
            Some("Damnation [MH2] {85}")
        );
        assert_eq!(expected_stem("Damnation", "mh2", "★"), None);
    }

    #[test]
    fn test_missing_archive_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("renders.zip");
        let err = filter_archive(&missing, &[card("Damnation", "85")]).unwrap_err();
        assert!(err.is_fatal());
        assert_matches!(err, Error::ArchiveMissing(p) if p == missing);
    }

    #[test]
    fn test_filter_drops_archived_single_face() {
        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("renders.zip");
        write_archive(&zip_path, &["normal/Damnation [MH2] {85}.png", "README"]);

        let records = vec![card("Damnation", "85"), card("Dauthi Voidwalker", "86")];
        let kept = filter_archive(&zip_path, &records).unwrap();
        assert_eq!(kept, vec![card("Dauthi Voidwalker", "86")]);
    }

    #[test]
    fn test_dual_face_needs_both_faces() {
        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("renders.zip");
        write_archive(&zip_path, &["Delver of Secrets [MH2] {1}.jpg"]);

        let mut record = card("Delver of Secrets // Insectile Aberration", "1");
        record.layout = "transform".into();
        record.card_faces = Some(vec![
            FaceData {
                name: Some("Delver of Secrets".into()),
                ..Default::default()
            },
            FaceData {
                name: Some("Insectile Aberration".into()),
                ..Default::default()
            },
        ]);

        let kept = filter_archive(&zip_path, std::slice::from_ref(&record)).unwrap();
        assert_eq!(kept.len(), 1);

        write_archive(
            &zip_path,
            &["Delver of Secrets [MH2] {1}.jpg", "Insectile Aberration [MH2] {1}.jpg"],
        );
        let kept = filter_archive(&zip_path, std::slice::from_ref(&record)).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let zip_path = dir.path().join("renders.zip");
        write_archive(&zip_path, &["Damnation [MH2] {85}.jpg"]);

        let records = vec![card("Damnation", "85"), card("Other", "x")];
        let first = filter_archive(&zip_path, &records).unwrap();
        let second = filter_archive(&zip_path, &records).unwrap();
        assert_eq!(first, second);
        assert_eq!(records.len(), 2);
    }
}
