use super::normalize::{derive_speakers, text_totals};
use crate::transcript::{Provenance, TranscriptRecord, TranscriptSegment};
use chrono::Utc;

/// Demo phrases cycled into synthesized transcripts. The first one always
/// leads, so a synthesized record is recognizable at a glance.
const DEMO_PHRASES: &[&str] = &[
    "هذه نسخة تجريبية وليست نتيجة معالجة حقيقية",
    "مرحباً بكم في منصة صوت لتحويل الكلام إلى نص",
    "يرجى رفع ملف صوتي للحصول على نسخة فعلية",
    "تدعم المنصة التعرف على الكلام باللغة العربية",
    "جودة النسخ تعتمد على وضوح التسجيل الصوتي",
    "يمكن عرض المتحدثين المختلفين في التسجيل",
    "شكراً لاستخدامكم المنصة",
];

const DEMO_MODEL: &str = "sawt-demo";

/// Last-resort generator of a placeholder record when no real data exists.
///
/// Output is keyed by the transcript id: the same id yields the same
/// segments for the lifetime of the process (cross-process stability is not
/// promised). Records are always tagged `synthetic` and always carry at
/// least one segment, so this source can never fail and can never be
/// mistaken for real data.
pub struct DemoRecordSynthesizer;

impl DemoRecordSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize(&self, id: &str) -> TranscriptRecord {
        let mut rng = SeededRng::from_key(id);

        let segment_count = 3 + (rng.next() % 4) as usize;
        let speaker_count = 1 + (rng.next() % 2) as usize;

        let mut segments = Vec::with_capacity(segment_count);
        let mut cursor = 0.0_f64;

        for index in 0..segment_count {
            let text = DEMO_PHRASES[if index == 0 {
                0
            } else {
                (rng.next() as usize) % DEMO_PHRASES.len()
            }];

            // 2.5s to 6.0s per segment, in half-second steps.
            let duration = 2.5 + (rng.next() % 8) as f64 * 0.5;
            let confidence = 0.72 + (rng.next() % 25) as f32 / 100.0;
            let speaker = (rng.next() as usize) % speaker_count;

            segments.push(TranscriptSegment {
                start: cursor,
                end: cursor + duration,
                text: text.to_string(),
                confidence: Some(confidence),
                speaker_id: Some(format!("spk_{}", speaker)),
            });
            cursor += duration;
        }

        let (full_text, total_words, total_characters) = text_totals(&segments);
        let speakers = derive_speakers(&segments);

        TranscriptRecord {
            id: id.to_string(),
            filename: Some(format!("{}.wav", id)),
            created_at: Utc::now(),
            language: Some("ar".to_string()),
            model_used: Some(DEMO_MODEL.to_string()),
            confidence_score: Some(0.8),
            processing_time: None,
            segments,
            speakers,
            full_text,
            total_words,
            total_characters,
            analysis: None,
            provenance: Provenance::Synthetic,
        }
    }
}

impl Default for DemoRecordSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// xorshift64* seeded with FNV-1a over the key bytes.
struct SeededRng(u64);

impl SeededRng {
    fn from_key(key: &str) -> Self {
        let mut hash = 0xcbf2_9ce4_8422_2325_u64;
        for byte in key.bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        // Zero is a fixed point of xorshift.
        Self(hash | 1)
    }

    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }
}
