use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::history::WatchHistoryStore;
use super::store::VideoStore;
use crate::models::Video;

/// Only this many of the closest neighbors contribute candidates.
const MAX_NEIGHBORS: usize = 5;

/// Proposes videos watched by users with overlapping history.
///
/// Neighbor similarity is the Jaccard index of watched-video-id sets.
/// A candidate's score accumulates, over every contributing neighbor,
/// `neighbor_similarity * (0.5 + 0.5 * watched_percentage / 100)`, so a
/// video several close neighbors finished ranks above one a distant
/// neighbor sampled. The category filter applies before ranking, matching
/// the content path.
pub fn recommend_by_collaboration(
    store: &VideoStore,
    history: &WatchHistoryStore,
    user_id: &str,
    limit: usize,
    category_filter: Option<&str>,
) -> Vec<Video> {
    if !history.has_history(user_id) {
        debug!(user_id, "no watch history for collaborative query");
        return Vec::new();
    }

    let watched: HashSet<&str> = history.watched_ids(user_id).into_iter().collect();

    let mut neighbors: Vec<(&str, f64)> = history
        .other_users(user_id)
        .into_iter()
        .filter_map(|other_id| {
            let other_watched: HashSet<&str> =
                history.watched_ids(other_id).into_iter().collect();
            let similarity = jaccard(&watched, &other_watched);
            (similarity > 0.0).then_some((other_id, similarity))
        })
        .collect();

    // Closest first; equal similarities resolve by user id so the neighbor
    // cut is deterministic.
    neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    neighbors.truncate(MAX_NEIGHBORS);

    let mut candidates: HashMap<&str, f64> = HashMap::new();
    for (neighbor_id, neighbor_similarity) in &neighbors {
        for entry in history.entries(neighbor_id) {
            let video_id = entry.video_id.as_str();
            if watched.contains(video_id) {
                continue;
            }
            let Some(video) = store.get(video_id) else {
                continue;
            };
            if category_filter.is_some_and(|category| video.category_id != category) {
                continue;
            }
            let weight = 0.5 + 0.5 * entry.watched_percentage / 100.0;
            *candidates.entry(video_id).or_insert(0.0) += neighbor_similarity * weight;
        }
    }

    let mut ranked: Vec<(&str, f64)> = candidates.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .filter_map(|(id, score)| store.get(id).map(|video| video.with_score(score)))
        .collect()
}

/// Jaccard index of two id sets; 0 if either is empty.
fn jaccard(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}
