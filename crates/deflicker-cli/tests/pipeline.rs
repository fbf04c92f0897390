//! Pipeline integration tests using synthetic images.
//!
//! Runs the full binary over programmatically generated sequences.

#![allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::expect_used,
    clippy::missing_panics_doc,
    deprecated
)]

use std::path::Path;

use assert_cmd::Command;
use deflicker_test_support::{mean_intensity, SyntheticFrameBuilder};
use predicates::prelude::*;

/// Command isolated from user and project config files.
fn deflicker(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deflicker").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .current_dir(home);
    cmd
}

/// Create a temporary directory with synthetic frames.
fn create_frames(frames: Vec<(&str, image::DynamicImage)>) -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();

    for (name, img) in frames {
        img.save(temp_dir.path().join(name)).unwrap();
    }

    temp_dir
}

fn spread(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    max - min
}

// === Basic Runs ===

#[test]
fn test_two_frames_global_average() {
    let home = tempfile::tempdir().unwrap();
    let src = create_frames(vec![
        ("a.png", SyntheticFrameBuilder::gray(2, 2, 10)),
        ("b.png", SyntheticFrameBuilder::gray(2, 2, 20)),
    ]);
    let dst = home.path().join("out");

    deflicker(home.path())
        .arg(src.path())
        .arg(&dst)
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished: 2 frames"));

    for name in ["a.png", "b.png"] {
        let out = image::open(dst.join(name)).unwrap().to_rgb8();
        assert!(out.pixels().all(|p| p.0 == [20, 20, 20]), "{name}");
    }
}

#[test]
fn test_run_subcommand_matches_default() {
    let home = tempfile::tempdir().unwrap();
    let src = create_frames(vec![
        ("a.png", SyntheticFrameBuilder::gray(2, 2, 10)),
        ("b.png", SyntheticFrameBuilder::gray(2, 2, 20)),
    ]);
    let dst = home.path().join("out");

    deflicker(home.path())
        .arg("run")
        .arg(src.path())
        .arg(&dst)
        .assert()
        .success();

    let out = image::open(dst.join("a.png")).unwrap().to_rgb8();
    assert!(out.pixels().all(|p| p.0 == [20, 20, 20]));
}

#[test]
fn test_flicker_reduced_across_sequence() {
    let home = tempfile::tempdir().unwrap();
    let offsets = [-25, 15, -5, 30, -20, 10];
    let frames = SyntheticFrameBuilder::flicker_sequence(64, 16, &offsets);
    let names: Vec<String> = (0..frames.len()).map(|i| format!("IMG_{i:04}.png")).collect();
    let before: Vec<f64> = frames.iter().map(mean_intensity).collect();
    let src = create_frames(names.iter().map(String::as_str).zip(frames).collect());
    let dst = home.path().join("out");

    deflicker(home.path())
        .args(["--threads", "3"])
        .arg(src.path())
        .arg(&dst)
        .assert()
        .success();

    let after: Vec<f64> = names
        .iter()
        .map(|n| mean_intensity(&image::open(dst.join(n)).unwrap()))
        .collect();
    assert!(spread(&after) < spread(&before) / 4.0);
}

#[test]
fn test_rolling_window_follows_slow_drift() {
    let home = tempfile::tempdir().unwrap();
    // Slow brightening: a rolling average keeps the trend, a global one flattens it.
    let frames: Vec<_> = (0..8u8)
        .map(|i| SyntheticFrameBuilder::horizontal_gradient(64, 8, 20 + i * 10, 120 + i * 10))
        .collect();
    let names: Vec<String> = (0..frames.len()).map(|i| format!("f{i}.png")).collect();
    let src = create_frames(names.iter().map(String::as_str).zip(frames).collect());
    let rolling = home.path().join("rolling");
    let global = home.path().join("global");

    deflicker(home.path())
        .args(["--window", "1"])
        .arg(src.path())
        .arg(&rolling)
        .assert()
        .success();
    deflicker(home.path())
        .arg(src.path())
        .arg(&global)
        .assert()
        .success();

    let means = |dir: &Path| -> Vec<f64> {
        names
            .iter()
            .map(|n| mean_intensity(&image::open(dir.join(n)).unwrap()))
            .collect()
    };
    assert!(spread(&means(&rolling)) > spread(&means(&global)));
}

#[test]
fn test_jpeg_sequence_written_as_jpeg() {
    let home = tempfile::tempdir().unwrap();
    let src = create_frames(vec![
        ("a.jpg", SyntheticFrameBuilder::horizontal_gradient(32, 32, 30, 200)),
        ("b.jpg", SyntheticFrameBuilder::horizontal_gradient(32, 32, 50, 220)),
    ]);
    let dst = home.path().join("out");

    deflicker(home.path())
        .args(["--jpeg-quality", "80"])
        .arg(src.path())
        .arg(&dst)
        .assert()
        .success();

    for name in ["a.jpg", "b.jpg"] {
        let format = image::ImageFormat::from_path(dst.join(name)).unwrap();
        assert_eq!(format, image::ImageFormat::Jpeg);
        assert!(image::open(dst.join(name)).is_ok());
    }
}

#[test]
fn test_unsupported_files_ignored() {
    let home = tempfile::tempdir().unwrap();
    let src = create_frames(vec![("a.png", SyntheticFrameBuilder::gray(2, 2, 10))]);
    std::fs::write(src.path().join("README.txt"), "notes").unwrap();
    let dst = home.path().join("out");

    deflicker(home.path())
        .arg(src.path())
        .arg(&dst)
        .assert()
        .success();

    assert!(dst.join("a.png").exists());
    assert!(!dst.join("README.txt").exists());
}

#[test]
fn test_empty_source_succeeds() {
    let home = tempfile::tempdir().unwrap();
    let src = tempfile::tempdir().unwrap();

    deflicker(home.path())
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished: 0 frames"));
}

// === Failures ===

#[test]
fn test_corrupt_frame_aborts_run() {
    let home = tempfile::tempdir().unwrap();
    let src = create_frames(vec![("a.png", SyntheticFrameBuilder::gray(2, 2, 10))]);
    std::fs::write(src.path().join("b.png"), b"definitely not a png").unwrap();

    deflicker(home.path())
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to decode").and(predicate::str::contains("b.png")));
}

#[test]
fn test_rows_past_bottom_abort_run() {
    let home = tempfile::tempdir().unwrap();
    let src = create_frames(vec![("a.png", SyntheticFrameBuilder::gray(4, 4, 10))]);

    deflicker(home.path())
        .args(["--stop-y", "10"])
        .arg(src.path())
        .arg(home.path().join("out"))
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("analyze failed for")
                .and(predicate::str::contains("invalid row range 0..10")),
        );
}

#[test]
fn test_same_source_and_destination_rejected() {
    let home = tempfile::tempdir().unwrap();
    let src = create_frames(vec![("a.png", SyntheticFrameBuilder::gray(2, 2, 10))]);

    deflicker(home.path())
        .arg(src.path())
        .arg(src.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("same directory"));
}

#[test]
fn test_sampling_rows_restrict_histograms() {
    let home = tempfile::tempdir().unwrap();
    // Rows 0..2 match across frames; the bottom row differs wildly.
    let mut bright_bottom = SyntheticFrameBuilder::gray(4, 3, 100).to_rgb8();
    for x in 0..4 {
        bright_bottom.put_pixel(x, 2, image::Rgb([250, 250, 250]));
    }
    let src = create_frames(vec![
        ("a.png", SyntheticFrameBuilder::gray(4, 3, 100)),
        ("b.png", image::DynamicImage::ImageRgb8(bright_bottom)),
    ]);
    let dst = home.path().join("out");

    deflicker(home.path())
        .args(["--start-y", "0", "--stop-y", "2"])
        .arg(src.path())
        .arg(&dst)
        .assert()
        .success();

    // Identical sampled rows give identical histograms, so sampled levels are kept.
    let a = image::open(dst.join("a.png")).unwrap().to_rgb8();
    assert!(a.pixels().all(|p| p.0 == [100, 100, 100]));
    let b = image::open(dst.join("b.png")).unwrap().to_rgb8();
    assert_eq!(b.get_pixel(0, 0).0, [100, 100, 100]);
}
