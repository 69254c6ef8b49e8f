//! Canonical transcript record model
//!
//! Every source the resolver consults (live STT engine, job registry,
//! result files, cache, synthesizer) gets normalized into `TranscriptRecord`
//! so the HTTP layer only ever deals with one shape.

mod record;

pub use record::{Provenance, Speaker, TranscriptRecord, TranscriptSegment};
