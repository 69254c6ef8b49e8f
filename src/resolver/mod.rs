//! Transcript resolution pipeline
//!
//! Answers "best available record for this id" by consulting, in strict
//! priority order:
//! 1. the live STT engine (`live_backend`)
//! 2. the in-process job registry (`job_registry`)
//! 3. on-disk analysis artifacts (`result_file` / `result_file_fallback`)
//! 4. the durable transcript cache (`cache_file`)
//! 5. a deterministic demo record (`synthetic`)
//!
//! Each source failure is recoverable: the chain advances instead of
//! surfacing the error. The provenance tag on the returned record says
//! which source won.

mod cache;
mod category;
mod error;
mod live;
mod locator;
mod normalize;
mod resolver;
mod synth;

pub use cache::{CacheEntry, CacheStore};
pub use category::{Category, ARTIFACT_SUFFIX};
pub use error::{SourceError, SourceResult};
pub use live::{HttpLiveClient, LiveTranscriptSource, RawSegment, RawTranscript};
pub use locator::{find_latest, ResultFileDescriptor};
pub use normalize::ArtifactDoc;
pub use resolver::{ResolverConfig, TranscriptResolver};
pub use synth::DemoRecordSynthesizer;
