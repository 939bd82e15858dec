//! Integration tests for the extrack binary.
//!
//! These tests verify:
//! - Help output
//! - CSV export from a file store, with and without filters
//! - Error reporting for bad store URLs and filters

use assert_cmd::Command;
use exercise_core::{ExerciseDate, JsonFileStore, NewExercise, RecordStore, Unit};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI binary
fn cli() -> Command {
    Command::cargo_bin("extrack").expect("Failed to find extrack binary")
}

/// Write a config file so the user's own config never leaks into tests
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, "[server]\nport = 3000\n").unwrap();
    path
}

/// Seed a JSON file store with a few exercises
async fn seed_store(path: &Path) {
    let store = JsonFileStore::open(path).await.unwrap();
    for (name, reps, unit) in [("squat", 5, Unit::Lbs), ("bench", 8, Unit::Kgs), ("row", 10, Unit::Kgs)] {
        let exercise =
            NewExercise::new(name, reps, 100.0, unit, ExerciseDate::parse("03-14-22").unwrap())
                .unwrap();
        store.insert_one(exercise).await.unwrap();
    }
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exercise log REST backend"));
}

#[tokio::test]
async fn test_export_all() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path());
    let store_path = temp_dir.path().join("exercises.json");
    let csv_path = temp_dir.path().join("export.csv");
    seed_store(&store_path).await;

    cli()
        .arg("export")
        .arg("--config")
        .arg(&config)
        .arg("--store")
        .arg(format!("file://{}", store_path.display()))
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 exercises"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.starts_with("id,name,reps,weight,unit,date"));
    assert_eq!(csv_content.lines().count(), 4);
}

#[tokio::test]
async fn test_export_with_filter() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path());
    let store_path = temp_dir.path().join("exercises.json");
    let csv_path = temp_dir.path().join("kgs.csv");
    seed_store(&store_path).await;

    cli()
        .arg("export")
        .arg("--config")
        .arg(&config)
        .arg("--store")
        .arg(format!("file://{}", store_path.display()))
        .arg("--unit")
        .arg("kgs")
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 exercises"));

    let csv_content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv_content.contains(",bench,"));
    assert!(csv_content.contains(",row,"));
    assert!(!csv_content.contains(",squat,"));
}

#[test]
fn test_export_empty_memory_store() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path());
    let csv_path = temp_dir.path().join("empty.csv");

    cli()
        .arg("export")
        .arg("--config")
        .arg(&config)
        .arg("--store")
        .arg("memory:")
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 0 exercises"));

    assert!(csv_path.exists());
}

#[test]
fn test_unsupported_store_fails() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path());

    cli()
        .arg("export")
        .arg("--config")
        .arg(&config)
        .arg("--store")
        .arg("mongodb://localhost/exercises")
        .arg("--output")
        .arg(temp_dir.path().join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported store"));
}

#[test]
fn test_non_numeric_filter_fails() {
    let temp_dir = setup_test_dir();
    let config = write_config(temp_dir.path());

    cli()
        .arg("export")
        .arg("--config")
        .arg(&config)
        .arg("--store")
        .arg("memory:")
        .arg("--reps")
        .arg("lots")
        .arg("--output")
        .arg(temp_dir.path().join("out.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidFilter"));
}
