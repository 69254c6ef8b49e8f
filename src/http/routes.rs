use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Transcript resolution
        .route("/transcripts/:transcript_id", get(handlers::get_transcript))
        .route(
            "/transcripts/:transcript_id/analysis/:category",
            get(handlers::get_analysis),
        )
        // Job status
        .route("/jobs/:transcript_id", get(handlers::get_job))
        // The Next.js demo frontend runs on its own origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
