mod synthetic;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::engine::RecommendationEngine;
use crate::error::AppResult;
use crate::models::Video;

pub use synthetic::SyntheticSource;

/// Supplies normalized video records to the engine.
///
/// The `Video` schema is the whole contract: the engine never learns
/// whether records came from a live provider or a generator, and nothing
/// behind this trait may leak provider-specific shapes past it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Videos matching a text query, optionally restricted to a category.
    async fn search<'a>(
        &self,
        query: &str,
        category_id: Option<&'a str>,
        max_results: usize,
    ) -> AppResult<Vec<Video>>;

    /// Currently popular videos, optionally restricted to a category.
    async fn trending<'a>(&self, category_id: Option<&'a str>, max_results: usize)
        -> AppResult<Vec<Video>>;

    /// A single video by id, `None` when the provider does not know it.
    async fn video(&self, id: &str) -> AppResult<Option<Video>>;
}

/// Fills an empty engine with trending records from a source.
///
/// Returns how many records were ingested. Provider failures propagate;
/// the caller decides whether an unseeded catalog is fatal.
pub async fn seed_engine(
    source: &dyn VideoSource,
    engine: &RwLock<RecommendationEngine>,
    count: usize,
) -> AppResult<usize> {
    if count == 0 {
        return Ok(0);
    }
    let videos = source.trending(None, count).await?;
    let seeded = videos.len();
    engine.write().await.add_videos(videos);
    info!(seeded, "seeded catalog from video source");
    Ok(seeded)
}
