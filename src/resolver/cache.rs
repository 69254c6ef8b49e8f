use crate::transcript::TranscriptRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// One cached resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub id: String,
    pub record: TranscriptRecord,
    pub written_at: DateTime<Utc>,
}

/// On-disk document shape: one entry per transcript id.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheDocument {
    entries: HashMap<String, CacheEntry>,
}

#[derive(Serialize)]
struct CacheDocumentRef<'a> {
    entries: &'a HashMap<String, CacheEntry>,
}

/// Durable transcript cache: a single JSON document on disk plus an
/// in-memory layer for the current process lifetime.
///
/// The document is read lazily once, on the first `get` miss; after that
/// the in-memory layer is authoritative until the process exits. Another
/// process changing the file underneath is accepted staleness (no file
/// locking, single-process assumption).
pub struct CacheStore {
    file_path: PathBuf,
    /// `None` until the on-disk document has been read once.
    entries: RwLock<Option<HashMap<String, CacheEntry>>>,
}

impl CacheStore {
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            entries: RwLock::new(None),
        }
    }

    /// Look up a cached record. On the first miss the on-disk document is
    /// parsed and the in-memory layer populated fully, not just this key.
    pub async fn get(&self, id: &str) -> Option<CacheEntry> {
        {
            let entries = self.entries.read().await;
            if let Some(map) = entries.as_ref() {
                return map.get(id).cloned();
            }
        }

        let mut entries = self.entries.write().await;
        // Another request may have loaded the document while we waited.
        if entries.is_none() {
            *entries = Some(self.load_document());
        }
        entries.as_ref().and_then(|map| map.get(id).cloned())
    }

    /// Store a resolved record under its id, overwriting any previous entry
    /// for the same key.
    ///
    /// Synthetic records are dropped: placeholder data must never persist
    /// past the point a real result becomes available.
    pub async fn put(&self, record: &TranscriptRecord) {
        if record.provenance.is_synthetic() {
            warn!(id = %record.id, "Refusing to cache synthetic record");
            return;
        }

        let entry = CacheEntry {
            id: record.id.clone(),
            record: record.clone(),
            written_at: Utc::now(),
        };

        let mut entries = self.entries.write().await;
        let map = entries.get_or_insert_with(|| self.load_document());
        map.insert(entry.id.clone(), entry);

        if let Err(e) = self.save(map) {
            warn!(error = %e, "Failed to persist transcript cache");
        }
    }

    /// Parse the on-disk document. A missing or unreadable file is an empty
    /// cache, not an error.
    fn load_document(&self) -> HashMap<String, CacheEntry> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) => {
                debug!(
                    file = %self.file_path.display(),
                    error = %e,
                    "No cache document on disk"
                );
                return HashMap::new();
            }
        };

        match serde_json::from_str::<CacheDocument>(&content) {
            Ok(document) => document.entries,
            Err(e) => {
                warn!(
                    file = %self.file_path.display(),
                    error = %e,
                    "Cache document unparsable, treating as empty"
                );
                HashMap::new()
            }
        }
    }

    fn save(&self, map: &HashMap<String, CacheEntry>) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).context("Failed to create cache directory")?;
        }

        let content = serde_json::to_string_pretty(&CacheDocumentRef { entries: map })
            .context("Failed to serialize cache document")?;

        fs::write(&self.file_path, content).context("Failed to write cache document")?;

        Ok(())
    }
}
