use super::state::AppState;
use crate::resolver::Category;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::info;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transcripts/:transcript_id
/// Best available transcript for this id. Always succeeds; the record's
/// `provenance` field tells the UI whether it is looking at demo data.
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(transcript_id): Path<String>,
) -> impl IntoResponse {
    info!("Resolving transcript: {}", transcript_id);

    let record = state.resolver.resolve(&transcript_id).await;

    (StatusCode::OK, Json(record)).into_response()
}

/// GET /transcripts/:transcript_id/analysis/:category
/// Analysis record for an artifact-backed category. 404 when no source
/// matches (these routes never synthesize).
pub async fn get_analysis(
    State(state): State<AppState>,
    Path((transcript_id, category)): Path<(String, String)>,
) -> impl IntoResponse {
    let Some(category) = Category::from_route(&category) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Unknown analysis category: {}", category),
            }),
        )
            .into_response();
    };

    info!("Resolving {:?} analysis: {}", category, transcript_id);

    match state
        .resolver
        .resolve_category(&transcript_id, category)
        .await
    {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No analysis found for transcript {}", transcript_id),
            }),
        )
            .into_response(),
    }
}

/// GET /jobs/:transcript_id
/// Status of the processing job for a transcript, if the registry knows it
pub async fn get_job(
    State(state): State<AppState>,
    Path(transcript_id): Path<String>,
) -> impl IntoResponse {
    match state.registry.find_job(&transcript_id).await {
        Some(job) => (StatusCode::OK, Json(job)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("No job found for transcript {}", transcript_id),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
