use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which data source produced a resolved record.
///
/// Callers use this to decide whether to show the "demo data" banner.
/// `ResultFileFallback` means the artifact may belong to a different
/// transcript; `CacheFile` may be stale; `Synthetic` is placeholder data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    LiveBackend,
    JobRegistry,
    ResultFile,
    ResultFileFallback,
    CacheFile,
    Synthetic,
}

impl Provenance {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Provenance::Synthetic)
    }
}

/// A single timed segment of transcribed speech.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    /// Start time in seconds from the beginning of the recording
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Transcribed text
    pub text: String,

    /// Confidence score (0.0 to 1.0), if the source reports one
    #[serde(default)]
    pub confidence: Option<f32>,

    /// Diarized speaker, if the source provides one
    #[serde(default)]
    pub speaker_id: Option<String>,
}

/// Aggregate statistics for one diarized speaker, unique by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Speaker {
    pub id: String,

    /// Display label (e.g. "المتحدث 1")
    pub label: String,

    /// Total speaking time in seconds
    pub total_speaking_time: f64,

    /// Number of segments attributed to this speaker
    pub segments_count: usize,

    /// Mean confidence across this speaker's segments
    #[serde(default)]
    pub confidence_score: Option<f32>,
}

/// Canonical transcript/analysis record, the single output shape of the
/// resolution pipeline.
///
/// An empty `segments` list is a valid resolved state ("no speech
/// detected"), not an unresolved one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptRecord {
    /// Stable identifier, unique per logical transcript
    pub id: String,

    /// Media file this transcript belongs to, if known
    #[serde(default)]
    pub filename: Option<String>,

    /// When the underlying result was produced
    pub created_at: DateTime<Utc>,

    /// ISO language code reported by the source
    #[serde(default)]
    pub language: Option<String>,

    /// STT model that produced the transcript
    #[serde(default)]
    pub model_used: Option<String>,

    /// Overall confidence (0.0 to 1.0)
    #[serde(default)]
    pub confidence_score: Option<f32>,

    /// Processing duration in seconds
    #[serde(default)]
    pub processing_time: Option<f64>,

    /// Timed segments, ordered by `start` ascending
    pub segments: Vec<TranscriptSegment>,

    /// Per-speaker aggregates, unique by speaker id
    #[serde(default)]
    pub speakers: Vec<Speaker>,

    /// All segment texts joined with single spaces
    pub full_text: String,

    /// Whitespace-token count of `full_text`
    pub total_words: usize,

    /// Character count of `full_text`
    pub total_characters: usize,

    /// Category-specific analysis payload (e.g. LLM analysis), passed
    /// through from the source unmodified
    #[serde(default)]
    pub analysis: Option<serde_json::Value>,

    /// Which source produced this record; never omitted
    pub provenance: Provenance,
}
