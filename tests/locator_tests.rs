// Integration tests for artifact file discovery
//
// These tests verify that the locator ranks artifacts by modification time,
// honors the naming convention, and degrades to None instead of failing.

use anyhow::Result;
use sawt_transcripts::resolver::find_latest;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const PREFIX: &str = "multimodal_analysis_results_";
const SUFFIX: &str = ".json";

/// Create an artifact file with a controlled modification time so ranking
/// does not depend on creation order.
fn touch(dir: &Path, name: &str, mtime_offset_secs: u64) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, b"{}")?;

    let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + mtime_offset_secs);
    let file = fs::OpenOptions::new().write(true).open(&path)?;
    file.set_modified(mtime)?;

    Ok(())
}

#[test]
fn unscoped_lookup_returns_most_recent_artifact() -> Result<()> {
    let temp_dir = TempDir::new()?;

    touch(temp_dir.path(), "multimodal_analysis_results_20240101.json", 100)?;
    touch(temp_dir.path(), "multimodal_analysis_results_20240315.json", 200)?;

    let descriptor = find_latest(temp_dir.path(), PREFIX, SUFFIX, None)
        .expect("should find an artifact");

    assert_eq!(descriptor.name, "multimodal_analysis_results_20240315.json");

    Ok(())
}

#[test]
fn ranking_is_by_mtime_not_by_name() -> Result<()> {
    let temp_dir = TempDir::new()?;

    // Lexicographically later name, but older mtime.
    touch(temp_dir.path(), "multimodal_analysis_results_20250101.json", 50)?;
    touch(temp_dir.path(), "multimodal_analysis_results_20240101.json", 500)?;

    let descriptor = find_latest(temp_dir.path(), PREFIX, SUFFIX, None)
        .expect("should find an artifact");

    assert_eq!(descriptor.name, "multimodal_analysis_results_20240101.json");

    Ok(())
}

#[test]
fn naming_convention_is_enforced() -> Result<()> {
    let temp_dir = TempDir::new()?;

    touch(temp_dir.path(), "enhanced_truth_detection_results_1.json", 300)?;
    touch(temp_dir.path(), "multimodal_analysis_results_1.txt", 300)?;
    touch(temp_dir.path(), "notes.json", 300)?;
    touch(temp_dir.path(), "multimodal_analysis_results_1.json", 100)?;

    let descriptor = find_latest(temp_dir.path(), PREFIX, SUFFIX, None)
        .expect("should find an artifact");

    // The only candidate matching prefix AND suffix, despite being oldest.
    assert_eq!(descriptor.name, "multimodal_analysis_results_1.json");

    Ok(())
}

#[test]
fn scoped_lookup_never_returns_another_transcripts_file() -> Result<()> {
    let temp_dir = TempDir::new()?;

    touch(temp_dir.path(), "multimodal_analysis_results_t1_1.json", 100)?;
    touch(temp_dir.path(), "multimodal_analysis_results_t2_2.json", 900)?;

    let descriptor = find_latest(temp_dir.path(), PREFIX, SUFFIX, Some("t1"))
        .expect("should find the t1 artifact");

    // t2's file is newer but out of scope.
    assert_eq!(descriptor.name, "multimodal_analysis_results_t1_1.json");

    Ok(())
}

#[test]
fn scoped_miss_returns_none() -> Result<()> {
    let temp_dir = TempDir::new()?;

    touch(temp_dir.path(), "multimodal_analysis_results_t2_1.json", 100)?;

    assert!(find_latest(temp_dir.path(), PREFIX, SUFFIX, Some("t9")).is_none());

    Ok(())
}

#[test]
fn missing_directory_is_a_miss_not_an_error() {
    let result = find_latest(
        Path::new("/nonexistent/results/dir"),
        PREFIX,
        SUFFIX,
        None,
    );

    assert!(result.is_none());
}

#[test]
fn empty_directory_is_a_miss() -> Result<()> {
    let temp_dir = TempDir::new()?;

    assert!(find_latest(temp_dir.path(), PREFIX, SUFFIX, None).is_none());

    Ok(())
}
