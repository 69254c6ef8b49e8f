//! Source-schema normalization
//!
//! Each source speaks its own dialect; everything funnels through here into
//! `TranscriptRecord`. These helpers return `SourceResult` so the resolver
//! can treat a normalization fault like any other failed source attempt.

use super::error::{SourceError, SourceResult};
use super::live::{RawSegment, RawTranscript};
use super::locator::ResultFileDescriptor;
use crate::jobs::Job;
use crate::transcript::{Provenance, Speaker, TranscriptRecord, TranscriptSegment};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Extensions probed, in order, when locating the media file behind a
/// transcript id. `.wav` is assumed when nothing matches.
pub const MEDIA_EXTENSION_CANDIDATES: &[&str] =
    &["wav", "mp3", "mp4", "m4a", "webm", "ogg", "flac"];

pub const DEFAULT_MEDIA_EXTENSION: &str = "wav";

/// On-disk analysis artifact schema. Deliberately loose: prior runs wrote
/// several generations of this file.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactDoc {
    #[serde(default)]
    pub transcript_id: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub model_used: Option<String>,

    #[serde(default)]
    pub confidence_score: Option<f32>,

    #[serde(default)]
    pub processing_time: Option<f64>,

    #[serde(default)]
    pub segments: Vec<RawSegment>,

    #[serde(default)]
    pub speakers: Vec<Speaker>,

    #[serde(default)]
    pub analysis: Option<serde_json::Value>,
}

/// Find the media file named after `id` in the uploads directory, probing
/// the fixed extension candidates in order.
pub fn probe_media_filename(uploads_dir: &Path, id: &str) -> String {
    for ext in MEDIA_EXTENSION_CANDIDATES {
        let candidate = format!("{}.{}", id, ext);
        if uploads_dir.join(&candidate).exists() {
            return candidate;
        }
    }
    format!("{}.{}", id, DEFAULT_MEDIA_EXTENSION)
}

/// Join segment texts with single spaces and derive word/character totals
/// from the joined text.
pub fn text_totals(segments: &[TranscriptSegment]) -> (String, usize, usize) {
    let full_text = segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let total_words = full_text.split_whitespace().count();
    let total_characters = full_text.chars().count();
    (full_text, total_words, total_characters)
}

/// Aggregate per-speaker stats from diarized segments, in first-appearance
/// order. Segments without a speaker id contribute to no speaker.
pub fn derive_speakers(segments: &[TranscriptSegment]) -> Vec<Speaker> {
    let mut speakers: Vec<Speaker> = Vec::new();
    let mut confidence_sums: Vec<(f32, usize)> = Vec::new();

    for segment in segments {
        let Some(speaker_id) = &segment.speaker_id else {
            continue;
        };

        let index = match speakers.iter().position(|s| &s.id == speaker_id) {
            Some(index) => index,
            None => {
                speakers.push(Speaker {
                    id: speaker_id.clone(),
                    label: format!("المتحدث {}", speakers.len() + 1),
                    total_speaking_time: 0.0,
                    segments_count: 0,
                    confidence_score: None,
                });
                confidence_sums.push((0.0, 0));
                speakers.len() - 1
            }
        };

        let speaker = &mut speakers[index];
        speaker.total_speaking_time += (segment.end - segment.start).max(0.0);
        speaker.segments_count += 1;

        if let Some(confidence) = segment.confidence {
            let (sum, count) = &mut confidence_sums[index];
            *sum += confidence;
            *count += 1;
        }
    }

    for (speaker, (sum, count)) in speakers.iter_mut().zip(confidence_sums) {
        if count > 0 {
            speaker.confidence_score = Some(sum / count as f32);
        }
    }

    speakers
}

fn canonical_segments(raw: Vec<RawSegment>) -> Vec<TranscriptSegment> {
    let mut segments: Vec<TranscriptSegment> = raw
        .into_iter()
        .map(|segment| TranscriptSegment {
            start: segment.start,
            end: segment.end,
            text: segment.text,
            confidence: segment.confidence,
            speaker_id: segment.speaker,
        })
        .collect();

    segments.sort_by(|a, b| a.start.total_cmp(&b.start));
    segments
}

/// Normalize a live-engine payload into the canonical record.
pub fn from_live(
    id: &str,
    raw: RawTranscript,
    uploads_dir: &Path,
) -> SourceResult<TranscriptRecord> {
    let raw_segments = raw
        .segments
        .ok_or_else(|| SourceError::Malformed("transcript has no segments array".to_string()))?;

    let segments = canonical_segments(raw_segments);
    let (full_text, total_words, total_characters) = text_totals(&segments);
    let speakers = derive_speakers(&segments);

    Ok(TranscriptRecord {
        id: id.to_string(),
        filename: Some(probe_media_filename(uploads_dir, id)),
        created_at: Utc::now(),
        language: raw.language,
        model_used: raw.model_used,
        confidence_score: raw.confidence_score,
        processing_time: raw.processing_time,
        segments,
        speakers,
        full_text,
        total_words,
        total_characters,
        analysis: raw.llm_analysis,
        provenance: Provenance::LiveBackend,
    })
}

/// Normalize a completed registry job. A job without a stored result is not
/// a usable source.
pub fn from_job(job: &Job) -> SourceResult<TranscriptRecord> {
    let result = job
        .result
        .as_ref()
        .ok_or_else(|| SourceError::Malformed("completed job has no stored result".to_string()))?;

    let mut segments = result.segments.clone();
    segments.sort_by(|a, b| a.start.total_cmp(&b.start));

    let (full_text, total_words, total_characters) = text_totals(&segments);
    let speakers = if result.speakers.is_empty() {
        derive_speakers(&segments)
    } else {
        result.speakers.clone()
    };

    Ok(TranscriptRecord {
        id: job.transcript_id.clone(),
        filename: None,
        created_at: job.created_at,
        language: result.language.clone(),
        model_used: result.model_used.clone(),
        confidence_score: result.confidence_score,
        processing_time: result.processing_time,
        segments,
        speakers,
        full_text,
        total_words,
        total_characters,
        analysis: None,
        provenance: Provenance::JobRegistry,
    })
}

/// Normalize an on-disk artifact document. `provenance` is supplied by the
/// caller: `ResultFile` for a scoped hit, `ResultFileFallback` when the
/// artifact was picked without an owner filter.
pub fn from_artifact(
    id: &str,
    descriptor: &ResultFileDescriptor,
    doc: ArtifactDoc,
    provenance: Provenance,
) -> TranscriptRecord {
    let segments = canonical_segments(doc.segments);
    let (full_text, total_words, total_characters) = text_totals(&segments);
    let speakers = if doc.speakers.is_empty() {
        derive_speakers(&segments)
    } else {
        doc.speakers
    };

    // Prefer the document's own timestamp, then the file mtime.
    let created_at = doc
        .created_at
        .unwrap_or_else(|| DateTime::<Utc>::from(descriptor.last_modified));

    if let Some(owner) = &doc.transcript_id {
        if owner != id {
            debug!(
                requested = %id,
                owner = %owner,
                file = %descriptor.name,
                "Artifact belongs to a different transcript"
            );
        }
    }

    TranscriptRecord {
        // Keyed by the requested id even in the fallback phase, so cache
        // write-back and caller correlation stay consistent. The provenance
        // tag records that the data may belong to another transcript.
        id: id.to_string(),
        filename: None,
        created_at,
        language: doc.language,
        model_used: doc.model_used,
        confidence_score: doc.confidence_score,
        processing_time: doc.processing_time,
        segments,
        speakers,
        full_text,
        total_words,
        total_characters,
        analysis: doc.analysis,
        provenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: f64, end: f64, text: &str, speaker: Option<&str>) -> TranscriptSegment {
        TranscriptSegment {
            start,
            end,
            text: text.to_string(),
            confidence: Some(0.9),
            speaker_id: speaker.map(str::to_string),
        }
    }

    #[test]
    fn totals_join_with_single_spaces() {
        let segments = vec![segment(0.0, 1.0, "a", None), segment(1.0, 2.0, "b", None)];

        let (full_text, words, characters) = text_totals(&segments);

        assert_eq!(full_text, "a b");
        assert_eq!(words, 2);
        assert_eq!(characters, 3);
    }

    #[test]
    fn totals_of_no_segments_are_zero() {
        let (full_text, words, characters) = text_totals(&[]);

        assert_eq!(full_text, "");
        assert_eq!(words, 0);
        assert_eq!(characters, 0);
    }

    #[test]
    fn speakers_aggregate_in_first_appearance_order() {
        let segments = vec![
            segment(0.0, 2.0, "مرحبا", Some("spk_1")),
            segment(2.0, 3.0, "أهلا", Some("spk_0")),
            segment(3.0, 5.5, "بكم", Some("spk_1")),
        ];

        let speakers = derive_speakers(&segments);

        assert_eq!(speakers.len(), 2);
        assert_eq!(speakers[0].id, "spk_1");
        assert_eq!(speakers[0].segments_count, 2);
        assert!((speakers[0].total_speaking_time - 4.5).abs() < 1e-9);
        assert_eq!(speakers[1].id, "spk_0");
        assert_eq!(speakers[1].segments_count, 1);
    }

    #[test]
    fn media_probe_defaults_to_wav() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(probe_media_filename(dir.path(), "t-1"), "t-1.wav");

        std::fs::write(dir.path().join("t-1.mp3"), b"x").unwrap();
        assert_eq!(probe_media_filename(dir.path(), "t-1"), "t-1.mp3");
    }
}
