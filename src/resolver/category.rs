/// File suffix shared by all analysis artifacts.
pub const ARTIFACT_SUFFIX: &str = ".json";

/// Resolution category. Each API route maps to one of these; the category
/// decides which on-disk artifacts apply and whether the chain may end in a
/// synthesized demo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Primary transcript-by-id flow. Never resolves to "not found".
    Transcript,

    /// Multimodal analysis runs, persisted as timestamped artifacts.
    MultimodalAnalysis,

    /// Enhanced truth-detection runs, persisted as timestamped artifacts.
    TruthDetection,
}

impl Category {
    /// Filename prefix of this category's artifacts, if it is backed by
    /// on-disk results at all.
    pub fn artifact_prefix(&self) -> Option<&'static str> {
        match self {
            Category::Transcript => None,
            Category::MultimodalAnalysis => Some("multimodal_analysis_results_"),
            Category::TruthDetection => Some("enhanced_truth_detection_results_"),
        }
    }

    /// Whether the chain may fall through to the demo synthesizer.
    /// Artifact-backed categories surface an explicit absence instead.
    pub fn allows_synthesis(&self) -> bool {
        matches!(self, Category::Transcript)
    }

    /// Parse the category path segment used by the analysis routes.
    pub fn from_route(segment: &str) -> Option<Category> {
        match segment {
            "multimodal" => Some(Category::MultimodalAnalysis),
            "truth-detection" => Some(Category::TruthDetection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_segments_map_to_categories() {
        assert_eq!(
            Category::from_route("multimodal"),
            Some(Category::MultimodalAnalysis)
        );
        assert_eq!(
            Category::from_route("truth-detection"),
            Some(Category::TruthDetection)
        );
        assert_eq!(Category::from_route("transcript"), None);
    }

    #[test]
    fn only_the_transcript_category_synthesizes() {
        assert!(Category::Transcript.allows_synthesis());
        assert!(!Category::MultimodalAnalysis.allows_synthesis());
        assert!(!Category::TruthDetection.allows_synthesis());
    }
}
