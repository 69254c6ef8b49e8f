//! HTTP API exposed to the demo frontend
//!
//! This module provides the REST surface over the resolution pipeline:
//! - GET /transcripts/:id - Best available transcript (never 404s)
//! - GET /transcripts/:id/analysis/:category - Artifact-backed analysis
//! - GET /jobs/:id - Processing job status
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
