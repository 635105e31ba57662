use std::collections::HashSet;

use crate::models::Video;

/// Weight for two videos sharing a channel.
const CHANNEL_WEIGHT: f64 = 0.4;
/// Weight for two videos sharing a category.
const CATEGORY_WEIGHT: f64 = 0.3;
/// Weight applied to the Jaccard index of the two tag sets.
const TAG_WEIGHT: f64 = 0.3;

/// Index-free similarity between two video records, used when the TF-IDF
/// index is unavailable.
///
/// Fixed weighting: same channel 0.4, same category 0.3, tag-set Jaccard
/// index scaled by 0.3; the sum is clamped to [0, 1]. A video compared with
/// itself scores 1.0 when it has tags and 0.7 when it has none (an empty tag
/// set contributes nothing). Symmetric in its arguments.
pub fn calculate_similarity(a: &Video, b: &Video) -> f64 {
    let mut score = 0.0;

    if !a.channel_title.is_empty() && a.channel_title == b.channel_title {
        score += CHANNEL_WEIGHT;
    }

    if !a.category_id.is_empty() && a.category_id == b.category_id {
        score += CATEGORY_WEIGHT;
    }

    score += TAG_WEIGHT * tag_jaccard(&a.tags, &b.tags);

    score.min(1.0)
}

/// Jaccard index of two tag lists; 0 if either is empty.
fn tag_jaccard(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, channel: &str, category: &str, tags: &[&str]) -> Video {
        Video {
            id: id.to_string(),
            title: String::new(),
            description: String::new(),
            published_at: String::new(),
            channel_id: String::new(),
            channel_title: channel.to_string(),
            category_id: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            duration: String::new(),
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            score: None,
        }
    }

    #[test]
    fn test_self_similarity_with_tags_is_one() {
        let v = video("a", "Tech Reviews", "28", &["rust", "tutorial"]);
        assert!((calculate_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_self_similarity_without_tags_is_max_attainable() {
        // No tags: channel (0.4) + category (0.3) is the ceiling.
        let v = video("a", "Tech Reviews", "28", &[]);
        assert!((calculate_similarity(&v, &v) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let a = video("a", "Tech Reviews", "28", &["rust", "tutorial"]);
        let b = video("b", "Tech Reviews", "27", &["rust", "web"]);
        assert_eq!(calculate_similarity(&a, &b), calculate_similarity(&b, &a));
    }

    #[test]
    fn test_disjoint_videos_score_zero() {
        let a = video("a", "Tech Reviews", "28", &["rust"]);
        let b = video("b", "Cooking Masters", "26", &["pasta"]);
        assert_eq!(calculate_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_partial_tag_overlap() {
        // Shared channel + shared category + Jaccard 1/3 on tags.
        let a = video("a", "Tech Reviews", "28", &["rust", "web"]);
        let b = video("b", "Tech Reviews", "28", &["rust", "cli"]);
        let expected = 0.4 + 0.3 + 0.3 * (1.0 / 3.0);
        assert!((calculate_similarity(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_channel_does_not_match_empty_channel() {
        // Two records with missing channels share nothing.
        let a = video("a", "", "", &[]);
        let b = video("b", "", "", &[]);
        assert_eq!(calculate_similarity(&a, &b), 0.0);
    }
}
