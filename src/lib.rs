pub mod config;
pub mod http;
pub mod jobs;
pub mod resolver;
pub mod transcript;

pub use config::Config;
pub use http::{create_router, AppState};
pub use jobs::{InMemoryJobRegistry, Job, JobRegistry, JobResult, JobStatus};
pub use resolver::{
    CacheEntry, CacheStore, Category, DemoRecordSynthesizer, HttpLiveClient,
    LiveTranscriptSource, RawSegment, RawTranscript, ResolverConfig, ResultFileDescriptor,
    SourceError, SourceResult, TranscriptResolver,
};
pub use transcript::{Provenance, Speaker, TranscriptRecord, TranscriptSegment};
