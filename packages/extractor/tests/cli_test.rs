//! Tests for the `transkribus-extractor` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixtures_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("pages")
}

fn bin() -> Command {
    Command::cargo_bin("transkribus-extractor").unwrap()
}

#[test]
fn test_extract_command_writes_tables() {
    let output = TempDir::new().unwrap();
    let csv_dir = output.path().join("csv");

    bin()
        .arg("extract")
        .arg("--input")
        .arg(fixtures_dir().join("batch_01"))
        .arg("--output")
        .arg(&csv_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Succeeded: 2"));

    assert!(csv_dir
        .join("0001_QTN_1952_07_05_001_SB_Zsn128163MR.csv")
        .is_file());
}

#[test]
fn test_extract_command_reports_failures_without_exiting() {
    let output = TempDir::new().unwrap();

    bin()
        .arg("extract")
        .arg("-i")
        .arg(fixtures_dir())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed: 2"));
}

#[test]
fn test_extract_command_empty_input() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let csv_dir = output.path().join("csv");

    bin()
        .args(["extract", "-i"])
        .arg(input.path())
        .arg("-o")
        .arg(&csv_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No XML files found"));

    assert!(!csv_dir.exists());
}

#[test]
fn test_extract_command_rejects_empty_namespace() {
    let input = TempDir::new().unwrap();

    bin()
        .args(["extract", "--namespace", ""])
        .arg("-i")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("namespace"));
}

#[test]
fn test_merge_command() {
    let input = TempDir::new().unwrap();
    fs::write(input.path().join("a.csv"), "a,b\n1,2\n").unwrap();
    fs::write(input.path().join("b.csv"), "a,b\n3,4\n5,6\n").unwrap();
    let merged = input.path().join("out").join("merged.csv");

    bin()
        .arg("merge")
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(&merged)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rows"));

    assert!(merged.is_file());
}

#[test]
fn test_merge_command_missing_input() {
    let dir = TempDir::new().unwrap();

    bin()
        .arg("merge")
        .arg("--input")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}
