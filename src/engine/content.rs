use tracing::{debug, warn};

use super::similarity::calculate_similarity;
use super::store::VideoStore;
use super::vectorizer::ContentVectorizer;
use crate::models::Video;

/// Ranks catalog videos by similarity to a source video.
///
/// Prefers the TF-IDF index; when it is unavailable every other catalog
/// video is scored with the manual feature scorer instead. The source video
/// is always excluded, the category filter applies before truncation, and
/// ties are broken by ascending video id (the catalog iteration order).
pub fn recommend_by_content(
    store: &VideoStore,
    vectorizer: &ContentVectorizer,
    source_id: &str,
    limit: usize,
    category_filter: Option<&str>,
) -> Vec<Video> {
    let Some(source) = store.get(source_id) else {
        warn!(video_id = source_id, "content query for unknown video");
        return Vec::new();
    };

    let mut candidates: Vec<(String, f64)> = match vectorizer.similarity(source_id) {
        Some(scores) => scores,
        None => {
            debug!("content index unavailable, using manual scorer");
            // The manual path drops zero-score candidates; the index path
            // keeps them so a sparse catalog can still fill the limit.
            store
                .iter()
                .filter(|video| video.id != source_id)
                .map(|video| (video.id.clone(), calculate_similarity(source, video)))
                .filter(|(_, score)| *score > 0.0)
                .collect()
        }
    };

    if let Some(category) = category_filter {
        candidates.retain(|(id, _)| {
            store
                .get(id)
                .is_some_and(|video| video.category_id == category)
        });
    }

    // Candidates arrive in catalog (ascending id) order; the stable sort
    // keeps that order for equal scores.
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates.truncate(limit);

    candidates
        .into_iter()
        .filter_map(|(id, score)| store.get(&id).map(|video| video.with_score(score)))
        .collect()
}
