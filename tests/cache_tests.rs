// Integration tests for the durable transcript cache
//
// These tests verify the JSON-document storage, the synthetic-record
// rejection invariant, and the lazy in-memory layer.

use anyhow::Result;
use sawt_transcripts::{CacheStore, DemoRecordSynthesizer, Provenance, TranscriptRecord};
use std::fs;
use tempfile::TempDir;

/// A realistic record with a chosen provenance. The synthesizer gives us
/// plausible Arabic content; only the tag differs per test.
fn sample_record(id: &str, provenance: Provenance) -> TranscriptRecord {
    let mut record = DemoRecordSynthesizer::new().synthesize(id);
    record.provenance = provenance;
    record
}

#[tokio::test]
async fn put_then_get_round_trips() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cache = CacheStore::new(temp_dir.path().join("cache.json"));

    let record = sample_record("t-1", Provenance::JobRegistry);
    cache.put(&record).await;

    let entry = cache.get("t-1").await.expect("entry should exist");
    assert_eq!(entry.id, "t-1");
    assert_eq!(entry.record.segments, record.segments);
    assert_eq!(entry.record.provenance, Provenance::JobRegistry);

    Ok(())
}

#[tokio::test]
async fn entries_survive_a_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cache_file = temp_dir.path().join("cache.json");

    let record = sample_record("t-1", Provenance::ResultFile);
    {
        let cache = CacheStore::new(cache_file.clone());
        cache.put(&record).await;
    }

    // A fresh store simulates a process restart: only the document remains.
    let cache = CacheStore::new(cache_file);
    let entry = cache.get("t-1").await.expect("entry should be durable");
    assert_eq!(entry.record.full_text, record.full_text);

    Ok(())
}

#[tokio::test]
async fn synthetic_records_are_never_stored() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cache_file = temp_dir.path().join("cache.json");
    let cache = CacheStore::new(cache_file.clone());

    let record = sample_record("t-demo", Provenance::Synthetic);
    cache.put(&record).await;

    assert!(cache.get("t-demo").await.is_none());
    assert!(!cache_file.exists(), "no document should be written");

    Ok(())
}

#[tokio::test]
async fn same_key_is_overwritten_not_duplicated() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cache_file = temp_dir.path().join("cache.json");

    {
        let cache = CacheStore::new(cache_file.clone());
        cache.put(&sample_record("t-1", Provenance::JobRegistry)).await;

        let mut updated = sample_record("t-1", Provenance::ResultFile);
        updated.full_text = "نسخة محدثة".to_string();
        cache.put(&updated).await;
    }

    let cache = CacheStore::new(cache_file.clone());
    let entry = cache.get("t-1").await.expect("entry should exist");
    assert_eq!(entry.record.full_text, "نسخة محدثة");

    // One key in the document, not an appended duplicate.
    let content = fs::read_to_string(&cache_file)?;
    let document: serde_json::Value = serde_json::from_str(&content)?;
    let entries = document
        .get("entries")
        .and_then(|entries| entries.as_object())
        .expect("document should hold an entries map");
    assert_eq!(entries.len(), 1);

    Ok(())
}

#[tokio::test]
async fn unparsable_document_reads_as_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cache_file = temp_dir.path().join("cache.json");
    fs::write(&cache_file, b"{ this is not json")?;

    let cache = CacheStore::new(cache_file);
    assert!(cache.get("t-1").await.is_none());

    Ok(())
}

#[tokio::test]
async fn unknown_key_is_a_miss() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let cache = CacheStore::new(temp_dir.path().join("cache.json"));

    cache.put(&sample_record("t-1", Provenance::JobRegistry)).await;

    assert!(cache.get("t-2").await.is_none());

    Ok(())
}
