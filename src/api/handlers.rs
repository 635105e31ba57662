use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::{Video, WatchedVideo};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub added: usize,
    pub skipped: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchRequest {
    pub user_id: String,
    pub video_id: String,
    /// Defaults to now when the client does not supply one.
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub watched_percentage: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendQuery {
    pub limit: Option<usize>,
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridQuery {
    pub user_id: Option<String>,
    pub video_id: Option<String>,
    pub limit: Option<usize>,
    pub category_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Ingest a batch of video records
///
/// Records are decoded one at a time so a single malformed element (for
/// example one missing its id) is skipped with a warning instead of
/// aborting the whole batch.
pub async fn add_videos(
    State(state): State<AppState>,
    Json(records): Json<Vec<serde_json::Value>>,
) -> (StatusCode, Json<IngestResponse>) {
    let mut videos: Vec<Video> = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for record in records {
        match serde_json::from_value::<Video>(record) {
            Ok(video) => videos.push(video),
            Err(error) => {
                warn!(%error, "skipping malformed video record");
                skipped += 1;
            }
        }
    }

    let added = videos.len();
    let mut engine = state.engine.write().await;
    engine.add_videos(videos);
    let total = engine.catalog_len();

    (
        StatusCode::CREATED,
        Json(IngestResponse {
            added,
            skipped,
            total,
        }),
    )
}

/// Get the full catalog
pub async fn get_videos(State(state): State<AppState>) -> Json<Vec<Video>> {
    let engine = state.engine.read().await;
    Json(engine.all_videos())
}

/// Get a single catalog record by id
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> AppResult<Json<Video>> {
    let engine = state.engine.read().await;
    engine
        .get_video(&video_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("video {video_id} not in catalog")))
}

/// Record a watch event
pub async fn add_watch(
    State(state): State<AppState>,
    Json(request): Json<WatchRequest>,
) -> AppResult<StatusCode> {
    if request.user_id.is_empty() || request.video_id.is_empty() {
        return Err(AppError::InvalidInput(
            "userId and videoId must be non-empty".to_string(),
        ));
    }

    let timestamp = request.timestamp.unwrap_or_else(Utc::now);
    let mut engine = state.engine.write().await;
    // Unknown video ids are logged and dropped inside the engine; the
    // request still succeeds.
    engine.add_to_history(
        &request.user_id,
        &request.video_id,
        timestamp,
        request.watched_percentage,
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Get a user's watch history, newest first
pub async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<WatchedVideo>> {
    let limit = query.limit.unwrap_or(20);
    let engine = state.engine.read().await;
    Json(engine.get_user_history(&user_id, limit))
}

/// Clear one user's watch history
pub async fn clear_user_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> StatusCode {
    let mut engine = state.engine.write().await;
    engine.clear_history(Some(&user_id));
    StatusCode::NO_CONTENT
}

/// Clear all watch history
pub async fn clear_all_history(State(state): State<AppState>) -> StatusCode {
    let mut engine = state.engine.write().await;
    engine.clear_history(None);
    StatusCode::NO_CONTENT
}

/// Content-similarity recommendations for a source video
pub async fn recommend_by_content(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Json<Vec<Video>> {
    let limit = query.limit.unwrap_or(state.config.max_recommendations);
    let engine = state.engine.read().await;
    Json(engine.recommend_by_content(&video_id, limit, query.category_id.as_deref()))
}

/// Collaborative recommendations for a user
pub async fn recommend_by_collaboration(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Json<Vec<Video>> {
    let limit = query.limit.unwrap_or(state.config.max_recommendations);
    let engine = state.engine.read().await;
    Json(engine.recommend_by_collaboration(&user_id, limit, query.category_id.as_deref()))
}

/// Blended recommendations, falling back to trending
pub async fn recommend_hybrid(
    State(state): State<AppState>,
    Query(query): Query<HybridQuery>,
) -> Json<Vec<Video>> {
    let limit = query.limit.unwrap_or(state.config.max_recommendations);
    let engine = state.engine.read().await;
    Json(engine.recommend_hybrid(
        query.user_id.as_deref(),
        query.video_id.as_deref(),
        query.category_id.as_deref(),
        limit,
    ))
}

/// Trending videos by popularity
pub async fn trending(
    State(state): State<AppState>,
    Query(query): Query<RecommendQuery>,
) -> Json<Vec<Video>> {
    let limit = query.limit.unwrap_or(state.config.max_recommendations);
    let engine = state.engine.read().await;
    Json(engine.trending(query.category_id.as_deref(), limit))
}
