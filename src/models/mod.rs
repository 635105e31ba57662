use serde::{Deserialize, Serialize};

/// A video record in the provider-normalized shape.
///
/// This is the boundary contract with whatever supplies records (a live
/// provider client or the synthetic source): everything must be normalized
/// into this schema before reaching `add_videos`. Fields a provider omits
/// default to empty/zero rather than failing deserialization, so one sparse
/// record never aborts an ingestion batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO-8601 duration string (e.g. "PT1H2M3S"). Opaque to the engine;
    /// parsing it is a presentation concern.
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    /// Relevance score in [0, 1]. Only set on records returned from a
    /// recommendation query; always `None` on catalog-stored records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Video {
    /// Returns a copy annotated with a recommendation score.
    pub fn with_score(&self, score: f64) -> Self {
        let mut video = self.clone();
        video.score = Some(score);
        video
    }
}

/// A video joined with how much of it the user watched, as returned from
/// watch-history reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedVideo {
    #[serde(flatten)]
    pub video: Video,
    pub watched_percentage: f64,
}
