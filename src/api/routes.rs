use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog
        .route("/videos", post(handlers::add_videos))
        .route("/videos", get(handlers::get_videos))
        .route("/videos/:video_id", get(handlers::get_video))
        // Watch history
        .route("/history", post(handlers::add_watch))
        .route("/history", delete(handlers::clear_all_history))
        .route("/history/:user_id", get(handlers::get_history))
        .route("/history/:user_id", delete(handlers::clear_user_history))
        // Recommendations
        .route(
            "/recommendations/content/:video_id",
            get(handlers::recommend_by_content),
        )
        .route(
            "/recommendations/collaborative/:user_id",
            get(handlers::recommend_by_collaboration),
        )
        .route("/recommendations/hybrid", get(handlers::recommend_hybrid))
        .route("/trending", get(handlers::trending))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
