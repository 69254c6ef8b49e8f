use crate::transcript::{Speaker, TranscriptSegment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a processing job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

/// Transcription output stored on a completed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub segments: Vec<TranscriptSegment>,

    #[serde(default)]
    pub speakers: Vec<Speaker>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub model_used: Option<String>,

    #[serde(default)]
    pub confidence_score: Option<f32>,

    /// Processing duration in seconds
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// A processing job tracked by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier (distinct from the transcript id)
    pub id: String,

    /// Transcript this job produces
    pub transcript_id: String,

    pub status: JobStatus,

    pub created_at: DateTime<Utc>,

    /// Present once the job has completed successfully
    #[serde(default)]
    pub result: Option<JobResult>,
}

impl Job {
    /// A not-yet-completed job seeded for an id the service has never seen.
    pub fn placeholder(transcript_id: &str) -> Self {
        Self {
            id: format!("job-{}", uuid::Uuid::new_v4()),
            transcript_id: transcript_id.to_string(),
            status: JobStatus::Processing,
            created_at: Utc::now(),
            result: None,
        }
    }
}
