mod collaborative;
mod content;
mod history;
mod similarity;
mod store;
mod trending;
mod vectorizer;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::models::{Video, WatchedVideo};

pub use similarity::calculate_similarity;

/// Weight of the content score in hybrid fusion.
const HYBRID_CONTENT_WEIGHT: f64 = 0.6;
/// Weight of the collaborative score in hybrid fusion.
const HYBRID_COLLAB_WEIGHT: f64 = 0.4;

/// The recommendation engine: catalog, watch history, and the derived
/// content index, owned together.
///
/// One instance exists per process, shared through the API state; query
/// paths receive it by reference rather than through any ambient global.
/// All operations are synchronous and never block on I/O.
#[derive(Debug)]
pub struct RecommendationEngine {
    store: store::VideoStore,
    history: history::WatchHistoryStore,
    vectorizer: vectorizer::ContentVectorizer,
}

impl RecommendationEngine {
    /// Creates an empty engine with the given vocabulary cap for the
    /// content index.
    pub fn new(vectorizer_max_terms: usize) -> Self {
        Self {
            store: store::VideoStore::new(),
            history: history::WatchHistoryStore::new(),
            vectorizer: vectorizer::ContentVectorizer::new(vectorizer_max_terms),
        }
    }

    /// Ingests a batch of records, overwriting any existing record with the
    /// same id, then rebuilds the content index. No-op on empty input.
    pub fn add_videos(&mut self, videos: Vec<Video>) {
        if videos.is_empty() {
            return;
        }
        let batch = videos.len();
        for mut video in videos {
            // Scores belong to query results, never to the catalog.
            video.score = None;
            self.store.insert(video);
        }
        self.vectorizer.rebuild(&self.store);
        info!(batch, total = self.store.len(), "ingested videos");
    }

    pub fn get_video(&self, id: &str) -> Option<Video> {
        self.store.get(id).cloned()
    }

    /// The full catalog in id order.
    pub fn all_videos(&self) -> Vec<Video> {
        self.store.iter().cloned().collect()
    }

    pub fn catalog_len(&self) -> usize {
        self.store.len()
    }

    /// Records a watch event. Unknown video ids are dropped with a warning
    /// rather than surfaced as an error.
    pub fn add_to_history(
        &mut self,
        user_id: &str,
        video_id: &str,
        timestamp: DateTime<Utc>,
        watched_percentage: f64,
    ) {
        if !self.store.contains(video_id) {
            warn!(video_id, "watch event for unknown video, ignoring");
            return;
        }
        self.history
            .add(user_id, video_id, timestamp, watched_percentage);
    }

    /// The user's watch history, newest first, joined with catalog records.
    pub fn get_user_history(&self, user_id: &str, limit: usize) -> Vec<WatchedVideo> {
        self.history
            .for_user(user_id)
            .into_iter()
            .take(limit)
            .filter_map(|entry| {
                self.store.get(&entry.video_id).map(|video| WatchedVideo {
                    video: video.clone(),
                    watched_percentage: entry.watched_percentage,
                })
            })
            .collect()
    }

    /// Clears one user's history, or everyone's when no user is given.
    pub fn clear_history(&mut self, user_id: Option<&str>) {
        match user_id {
            Some(user_id) => {
                self.history.clear_user(user_id);
                info!(user_id, "cleared watch history");
            }
            None => {
                self.history.clear_all();
                info!("cleared all watch history");
            }
        }
    }

    pub fn recommend_by_content(
        &self,
        source_id: &str,
        limit: usize,
        category_filter: Option<&str>,
    ) -> Vec<Video> {
        content::recommend_by_content(
            &self.store,
            &self.vectorizer,
            source_id,
            limit,
            category_filter,
        )
    }

    pub fn recommend_by_collaboration(
        &self,
        user_id: &str,
        limit: usize,
        category_filter: Option<&str>,
    ) -> Vec<Video> {
        collaborative::recommend_by_collaboration(
            &self.store,
            &self.history,
            user_id,
            limit,
            category_filter,
        )
    }

    /// Blends content and collaborative recommendations.
    ///
    /// Weighted-score fusion: results are unioned by id and re-scored as
    /// `0.6 * content + 0.4 * collaborative` with a missing side counting
    /// as zero, so each id appears at most once. When only one side
    /// produced results that side is returned as-is; when neither did, the
    /// trending fallback answers instead.
    pub fn recommend_hybrid(
        &self,
        user_id: Option<&str>,
        source_id: Option<&str>,
        category_filter: Option<&str>,
        limit: usize,
    ) -> Vec<Video> {
        let content_recs = source_id
            .map(|id| self.recommend_by_content(id, limit, category_filter))
            .unwrap_or_default();
        let collab_recs = user_id
            .map(|id| self.recommend_by_collaboration(id, limit, category_filter))
            .unwrap_or_default();

        match (content_recs.is_empty(), collab_recs.is_empty()) {
            (true, true) => self.trending(category_filter, limit),
            (false, true) => content_recs,
            (true, false) => collab_recs,
            (false, false) => fuse(content_recs, collab_recs, limit),
        }
    }

    /// Popularity-ranked catalog slice; the fallback when no personalized
    /// signal exists.
    pub fn trending(&self, category_filter: Option<&str>, limit: usize) -> Vec<Video> {
        trending::trending(&self.store, category_filter, limit)
    }
}

fn fuse(content_recs: Vec<Video>, collab_recs: Vec<Video>, limit: usize) -> Vec<Video> {
    struct Fused {
        video: Video,
        content_score: f64,
        collab_score: f64,
    }

    let mut by_id: HashMap<String, Fused> = HashMap::new();
    for video in content_recs {
        let score = video.score.unwrap_or(0.0);
        by_id.insert(
            video.id.clone(),
            Fused {
                video,
                content_score: score,
                collab_score: 0.0,
            },
        );
    }
    for video in collab_recs {
        let score = video.score.unwrap_or(0.0);
        by_id
            .entry(video.id.clone())
            .and_modify(|fused| fused.collab_score = score)
            .or_insert(Fused {
                video,
                content_score: 0.0,
                collab_score: score,
            });
    }

    let mut fused: Vec<Video> = by_id
        .into_values()
        .map(|f| {
            let score =
                HYBRID_CONTENT_WEIGHT * f.content_score + HYBRID_COLLAB_WEIGHT * f.collab_score;
            f.video.with_score(score)
        })
        .collect();
    fused.sort_by(|a, b| {
        b.score
            .unwrap_or(0.0)
            .total_cmp(&a.score.unwrap_or(0.0))
            .then_with(|| a.id.cmp(&b.id))
    });
    fused.truncate(limit);
    fused
}
