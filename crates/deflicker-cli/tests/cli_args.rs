//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use deflicker_test_support::SyntheticFrameBuilder;
use predicates::prelude::*;

/// Command isolated from user and project config files.
fn deflicker(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deflicker").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .current_dir(home);
    cmd
}

fn source_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    SyntheticFrameBuilder::gray(4, 4, 50)
        .save(dir.path().join("f0.png"))
        .unwrap();
    dir
}

// === Missing/Invalid Path Tests ===

#[test]
fn test_missing_paths_shows_error() {
    let home = tempfile::tempdir().unwrap();

    deflicker(home.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("SOURCE and DESTINATION are required"));
}

#[test]
fn test_missing_destination_shows_error() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .arg(src.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_nonexistent_source_fails() {
    let home = tempfile::tempdir().unwrap();

    deflicker(home.path())
        .arg(home.path().join("nope"))
        .arg(home.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_analyze_requires_source() {
    let home = tempfile::tempdir().unwrap();

    deflicker(home.path())
        .arg("analyze")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("SOURCE"));
}

// === Value Validation Tests ===

#[test]
fn test_jpeg_quality_out_of_range_rejected() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    for quality in ["0", "101"] {
        deflicker(home.path())
            .arg("--jpeg-quality")
            .arg(quality)
            .arg(src.path())
            .arg(home.path().join("out"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("1..=100"));
    }
}

#[test]
fn test_png_compression_must_be_known_preset() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .arg("--png-compression")
        .arg("9")
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fast, default, best"));
}

#[test]
fn test_zero_threads_rejected() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .arg("--threads")
        .arg("0")
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn test_non_numeric_window_rejected() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .arg("--window")
        .arg("wide")
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn test_empty_row_range_rejected() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .args(["--start-y", "3", "--stop-y", "3"])
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid row range 3..3"));
}

#[test]
fn test_invalid_format_rejected() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .arg("analyze")
        .arg("--format")
        .arg("xml")
        .arg(src.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("json").or(predicate::str::contains("jsonl")));
}

// === Help and Version ===

#[test]
fn test_help_lists_options() {
    let home = tempfile::tempdir().unwrap();

    deflicker(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--window")
                .and(predicate::str::contains("--jpeg-quality"))
                .and(predicate::str::contains("analyze")),
        );
}

#[test]
fn test_version() {
    let home = tempfile::tempdir().unwrap();

    deflicker(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deflicker"));
}

// === Verbosity Level Tests ===

#[test]
fn test_verbosity_vv_logs_debug() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .arg("-vv")
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_quiet_suppresses_status_lines() {
    let home = tempfile::tempdir().unwrap();
    let src = source_dir();

    deflicker(home.path())
        .arg("--quiet")
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
