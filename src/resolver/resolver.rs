use super::cache::CacheStore;
use super::category::{Category, ARTIFACT_SUFFIX};
use super::error::{SourceError, SourceResult};
use super::live::LiveTranscriptSource;
use super::locator::{self, ResultFileDescriptor};
use super::normalize::{self, ArtifactDoc};
use super::synth::DemoRecordSynthesizer;
use crate::jobs::JobRegistry;
use crate::transcript::{Provenance, TranscriptRecord};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Routing prefix the public transcript ids carry. Artifact filenames embed
/// the bare id, so the prefix is stripped before scoping a file search.
const ID_ROUTING_PREFIX: &str = "transcript-";

/// Filesystem layout the resolver consumes.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Directory holding timestamped analysis artifacts
    pub results_dir: PathBuf,

    /// Directory holding uploaded media files, probed for `{id}.{ext}`
    pub uploads_dir: PathBuf,
}

/// Orchestrates the resolution chain over all candidate sources.
///
/// Sources are tried strictly in order, each terminal on success:
///
/// 1. live STT engine (`live_backend`)
/// 2. in-process job registry (`job_registry`), seeding a placeholder job
///    for unknown ids and retrying the lookup once
/// 3. on-disk artifacts, scoped then unscoped (`result_file` /
///    `result_file_fallback`), for artifact-backed categories only
/// 4. durable cache (`cache_file`)
/// 5. demo synthesizer (`synthetic`), for the primary category only
///
/// No failure of an individual source escapes this type. Resolutions from
/// the registry or from artifacts are written back to the cache; live and
/// synthetic results are not.
pub struct TranscriptResolver {
    live: Arc<dyn LiveTranscriptSource>,
    registry: Arc<dyn JobRegistry>,
    cache: Arc<CacheStore>,
    synthesizer: DemoRecordSynthesizer,
    config: ResolverConfig,
}

impl TranscriptResolver {
    pub fn new(
        live: Arc<dyn LiveTranscriptSource>,
        registry: Arc<dyn JobRegistry>,
        cache: Arc<CacheStore>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            live,
            registry,
            cache,
            synthesizer: DemoRecordSynthesizer::new(),
            config,
        }
    }

    /// Primary transcript-by-id flow. Infallible: an id no source knows
    /// resolves to a synthesized demo record.
    pub async fn resolve(&self, id: &str) -> TranscriptRecord {
        match self.run_chain(id, Category::Transcript).await {
            Some(record) => record,
            // The transcript category always ends in the synthesize state;
            // this arm only documents that the chain cannot miss.
            None => self.synthesizer.synthesize(id),
        }
    }

    /// Artifact-backed categories. `None` means no source matched, which
    /// the HTTP layer maps to a 404-equivalent response.
    pub async fn resolve_category(&self, id: &str, category: Category) -> Option<TranscriptRecord> {
        self.run_chain(id, category).await
    }

    async fn run_chain(&self, id: &str, category: Category) -> Option<TranscriptRecord> {
        // 1. Live engine: authoritative, but may be down.
        match self.try_live(id).await {
            Ok(record) => {
                info!(id = %id, provenance = "live_backend", "Resolved from live engine");
                return Some(record);
            }
            Err(e) => debug!(id = %id, error = %e, "Live engine skipped"),
        }

        // 2. Job registry, with one-time placeholder seeding.
        if let Some(record) = self.try_registry(id).await {
            info!(id = %id, provenance = "job_registry", "Resolved from job registry");
            self.cache.put(&record).await;
            return Some(record);
        }

        // 3. On-disk artifacts, scoped to the id first, then unscoped.
        if let Some(prefix) = category.artifact_prefix() {
            if let Some(record) = self.try_result_file(id, prefix).await {
                let fallback = record.provenance == Provenance::ResultFileFallback;
                info!(id = %id, fallback = fallback, "Resolved from result file");
                self.cache.put(&record).await;
                return Some(record);
            }
        }

        // 4. Durable cache.
        if let Some(entry) = self.cache.get(id).await {
            info!(id = %id, provenance = "cache_file", "Resolved from cache");
            let mut record = entry.record;
            record.provenance = Provenance::CacheFile;
            return Some(record);
        }

        // 5. Demo synthesizer, where the category allows it.
        if category.allows_synthesis() {
            info!(id = %id, provenance = "synthetic", "Synthesized demo record");
            return Some(self.synthesizer.synthesize(id));
        }

        info!(id = %id, "No source matched");
        None
    }

    async fn try_live(&self, id: &str) -> SourceResult<TranscriptRecord> {
        let raw = self.live.fetch_transcript(id).await?;
        let record = normalize::from_live(id, raw, &self.config.uploads_dir)?;

        // A live transcript still being processed can legitimately carry an
        // empty segments array; that is not a terminal result yet.
        if record.segments.is_empty() {
            return Err(SourceError::Malformed(
                "live transcript has no segments yet".to_string(),
            ));
        }

        Ok(record)
    }

    async fn try_registry(&self, id: &str) -> Option<TranscriptRecord> {
        let job = match self.registry.find_completed_job(id).await {
            Some(job) => Some(job),
            None => {
                // Unknown ids become demo transcripts rather than errors:
                // seed a placeholder so the id surfaces in the registry,
                // then look once more.
                self.registry.create_placeholder_job(id).await;
                self.registry.find_completed_job(id).await
            }
        }?;

        match normalize::from_job(&job) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(id = %id, error = %e, "Registry job unusable");
                None
            }
        }
    }

    async fn try_result_file(&self, id: &str, prefix: &str) -> Option<TranscriptRecord> {
        let scope = strip_routing_prefix(id);

        // Phase 1: artifacts belonging to this transcript.
        if let Some(descriptor) =
            locator::find_latest(&self.config.results_dir, prefix, ARTIFACT_SUFFIX, Some(scope))
        {
            match self.load_artifact(id, &descriptor, Provenance::ResultFile) {
                Ok(record) => return Some(record),
                Err(e) => {
                    debug!(id = %id, file = %descriptor.name, error = %e, "Scoped artifact unusable")
                }
            }
        }

        // Phase 2: newest artifact of this category regardless of owner.
        // The record is tagged as a fallback so consumers know the data may
        // belong to a different transcript.
        if let Some(descriptor) =
            locator::find_latest(&self.config.results_dir, prefix, ARTIFACT_SUFFIX, None)
        {
            match self.load_artifact(id, &descriptor, Provenance::ResultFileFallback) {
                Ok(record) => return Some(record),
                Err(e) => {
                    debug!(id = %id, file = %descriptor.name, error = %e, "Fallback artifact unusable")
                }
            }
        }

        None
    }

    fn load_artifact(
        &self,
        id: &str,
        descriptor: &ResultFileDescriptor,
        provenance: Provenance,
    ) -> SourceResult<TranscriptRecord> {
        let content = fs::read_to_string(&descriptor.path)
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let doc: ArtifactDoc =
            serde_json::from_str(&content).map_err(|e| SourceError::Malformed(e.to_string()))?;

        Ok(normalize::from_artifact(id, descriptor, doc, provenance))
    }
}

fn strip_routing_prefix(id: &str) -> &str {
    id.strip_prefix(ID_ROUTING_PREFIX).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_prefix_is_stripped_for_scoping() {
        assert_eq!(strip_routing_prefix("transcript-abc"), "abc");
        assert_eq!(strip_routing_prefix("abc"), "abc");
    }
}
