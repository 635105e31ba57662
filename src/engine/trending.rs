use super::store::VideoStore;
use crate::models::Video;

/// Popularity-ranked slice of the catalog.
///
/// Pure read: filters by category when asked, orders by view count
/// descending (ties by ascending id), and annotates each result with a
/// log-scaled score, `ln(1 + view_count) / 20` clamped to [0, 1].
pub fn trending(store: &VideoStore, category_filter: Option<&str>, limit: usize) -> Vec<Video> {
    let mut videos: Vec<&Video> = store
        .iter()
        .filter(|video| {
            category_filter
                .map(|category| video.category_id == category)
                .unwrap_or(true)
        })
        .collect();

    videos.sort_by(|a, b| {
        b.view_count
            .cmp(&a.view_count)
            .then_with(|| a.id.cmp(&b.id))
    });
    videos.truncate(limit);

    videos
        .into_iter()
        .map(|video| video.with_score(trending_score(video.view_count)))
        .collect()
}

fn trending_score(view_count: u64) -> f64 {
    ((1.0 + view_count as f64).ln() / 20.0).clamp(0.0, 1.0)
}
