//! CLI end-to-end tests
//!
//! Tests for the cardforged command-line interface. Only offline commands are
//! exercised here; network-backed commands are covered in `http_test.rs`.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the cardforged binary
#[allow(deprecated)]
fn cardforged_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cardforged").unwrap();
    cmd.env_remove("CARD_ARCHIVE_PATH").env_remove("RUST_LOG");
    cmd
}

const RECORDS: &str = r#"[
    {"name": "Damnation", "set": "mh2", "collector_number": "85", "layout": "normal", "type_line": "Sorcery", "border_color": "black"},
    {"name": "Forest", "set": "mh2", "collector_number": "490", "layout": "normal", "type_line": "Basic Land — Forest", "frame_effects": ["etched"]},
    {"name": "Delver of Secrets // Insectile Aberration", "set": "isd", "collector_number": "51", "layout": "transform", "type_line": "Creature // Creature",
     "card_faces": [{"name": "Delver of Secrets"}, {"name": "Insectile Aberration"}]}
]"#;

fn write_records(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("records.json");
    fs::write(&path, RECORDS).unwrap();
    path
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = cardforged_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = cardforged_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cardforged"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = cardforged_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "cardforged {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_cli_query_help() {
    let mut cmd = cardforged_cmd();
    cmd.args(["query", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("card API search"))
        .stdout(predicate::str::contains("--quiet"));
}

#[test]
fn test_cli_classify() {
    let dir = tempdir().unwrap();
    let records = write_records(dir.path());

    let mut cmd = cardforged_cmd();
    cmd.arg("classify")
        .arg(&records)
        .assert()
        .success()
        .stdout(predicate::str::contains("Damnation (MH2) 85: normal / normal (1 face)"))
        .stdout(predicate::str::contains("Forest (MH2) 490: basic_land / etched (1 face)"))
        .stdout(predicate::str::contains(
            "Delver of Secrets // Insectile Aberration (ISD) 51: transform / normal (2 faces)",
        ));
}

#[test]
fn test_cli_classify_json() {
    let dir = tempdir().unwrap();
    let records = write_records(dir.path());

    let output = cardforged_cmd()
        .args(["classify", "--json"])
        .arg(&records)
        .output()
        .unwrap();
    assert!(output.status.success());

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plans.as_array().unwrap().len(), 3);
    assert_eq!(plans[2]["faces"][1]["name"], "Insectile Aberration");
    assert_eq!(plans[2]["lookup_name"], "Delver of Secrets");
}

#[test]
fn test_cli_classify_json_reports_malformed_records() {
    let dir = tempdir().unwrap();
    let records = dir.path().join("broken.json");
    fs::write(
        &records,
        r#"[
            {"name": "Front // Back", "set": "tst", "collector_number": "1", "layout": "transform", "card_faces": []},
            {"name": "Damnation", "set": "mh2", "collector_number": "85", "layout": "normal"}
        ]"#,
    )
    .unwrap();

    let output = cardforged_cmd()
        .args(["classify", "--json"])
        .arg(&records)
        .output()
        .unwrap();
    assert!(output.status.success());

    let plans: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plans[0]["label"], "Front // Back (TST) 1");
    assert!(plans[0]["error"].as_str().unwrap().contains("card_faces[0].name"));
    assert_eq!(plans[1]["lookup_name"], "Damnation");
}

#[test]
fn test_cli_classify_missing_file() {
    let mut cmd = cardforged_cmd();
    cmd.args(["classify", "/nonexistent/records.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read records file"));
}

#[test]
fn test_cli_filter_missing_archive_is_fatal() {
    let dir = tempdir().unwrap();
    let records = write_records(dir.path());

    let mut cmd = cardforged_cmd();
    cmd.arg("filter")
        .arg("--archive")
        .arg(dir.path().join("renders.zip"))
        .arg(&records)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_filter_drops_archived_cards() {
    let dir = tempdir().unwrap();
    let records = write_records(dir.path());
    let archive = dir.path().join("renders.zip");

    let file = fs::File::create(&archive).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("normal/Damnation [MH2] {85}.png", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"png").unwrap();
    zip.finish().unwrap();

    let output = cardforged_cmd()
        .arg("filter")
        .arg("--archive")
        .arg(&archive)
        .arg(&records)
        .output()
        .unwrap();
    assert!(output.status.success());

    let kept: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = kept
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Forest", "Delver of Secrets // Insectile Aberration"]);
}

#[test]
fn test_cli_validate_with_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
[naming]
template = "NAME (ARTIST) [SET] {NUMBER}"

[download]
scryfall_only = true

[sets.replace]
tsb = "tsp"
"#,
    )
    .unwrap();

    let mut cmd = cardforged_cmd();
    cmd.args(["validate"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("NAME (ARTIST) [SET] {NUMBER}"))
        .stdout(predicate::str::contains("Set replacements: 1"));
}

#[test]
fn test_cli_validate_rejects_bad_template() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[naming]\ntemplate = \"ARTIST\"\n").unwrap();

    let mut cmd = cardforged_cmd();
    cmd.args(["--config"])
        .arg(&config_path)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must contain NAME"));
}
