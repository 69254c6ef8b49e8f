use crate::jobs::JobRegistry;
use crate::resolver::TranscriptResolver;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The one resolution service every transcript/analysis route consults
    pub resolver: Arc<TranscriptResolver>,

    /// Job registry, exposed read-only through the job-status endpoint
    pub registry: Arc<dyn JobRegistry>,
}
