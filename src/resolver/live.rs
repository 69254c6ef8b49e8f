use super::error::{SourceError, SourceResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Response envelope from the live STT engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTranscriptEnvelope {
    #[serde(default)]
    pub transcript: Option<RawTranscript>,
}

/// Loose, engine-defined transcript shape. Normalization turns this into a
/// `TranscriptRecord`; a body without `segments` counts as malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTranscript {
    #[serde(default)]
    pub segments: Option<Vec<RawSegment>>,

    #[serde(default)]
    pub model_used: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub confidence_score: Option<f32>,

    /// Processing duration in seconds
    #[serde(default)]
    pub processing_time: Option<f64>,

    #[serde(default)]
    pub llm_analysis: Option<serde_json::Value>,
}

/// One segment as the engine reports it. Every field is optional on the
/// wire; missing numbers default to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub start: f64,

    #[serde(default)]
    pub end: f64,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub confidence: Option<f32>,

    #[serde(default)]
    pub speaker: Option<String>,
}

/// The one operation the resolver consumes from the live engine.
///
/// Injected as a trait so tests can substitute a fake engine.
#[async_trait]
pub trait LiveTranscriptSource: Send + Sync {
    async fn fetch_transcript(&self, id: &str) -> SourceResult<RawTranscript>;
}

/// HTTP client for the live STT engine.
pub struct HttpLiveClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpLiveClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LiveTranscriptSource for HttpLiveClient {
    async fn fetch_transcript(&self, id: &str) -> SourceResult<RawTranscript> {
        let url = format!("{}/v1/transcripts/{}", self.base_url, id);

        debug!(id = %id, url = %url, "Querying live STT engine");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable(format!(
                "engine returned {}",
                status
            )));
        }

        let envelope: RawTranscriptEnvelope = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let transcript = envelope
            .transcript
            .ok_or_else(|| SourceError::Malformed("response has no transcript".to_string()))?;

        if transcript.segments.is_none() {
            return Err(SourceError::Malformed(
                "transcript has no segments array".to_string(),
            ));
        }

        Ok(transcript)
    }
}
