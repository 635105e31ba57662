use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::VideoSource;
use crate::error::AppResult;
use crate::models::Video;

const CHANNELS: &[(&str, &str)] = &[
    ("UC1", "Tech Reviews"),
    ("UC2", "Gaming Central"),
    ("UC3", "Cooking Masters"),
    ("UC4", "Science Explained"),
    ("UC5", "Travel & Adventure"),
    ("UC6", "Music Station"),
    ("UC7", "Fitness Channel"),
    ("UC8", "DIY Projects"),
];

const CATEGORIES: &[&str] = &["10", "17", "20", "22", "26", "27", "28"];

const TITLES: &[&str] = &[
    "Ultimate Guide to Rust Programming",
    "Top 10 Smartphones of the Year",
    "Easy Recipe for Beginners: Pasta Carbonara",
    "How to Build Muscle Fast - Complete Workout",
    "Exploring the Hidden Beaches of Thailand",
    "Machine Learning Explained in 10 Minutes",
    "Review: The Latest Gaming Console",
    "DIY Home Decoration Ideas",
    "Understanding Quantum Physics",
    "Top Travel Destinations This Year",
    "The History of Rock Music",
    "5 Exercises for Better Posture",
    "Building a Web App from Scratch",
    "Healthy Breakfast Ideas for Busy People",
    "Guitar Tutorial for Beginners",
    "The Science of Sleep",
    "Photography Tips and Tricks",
    "How to Invest in Stocks for Beginners",
    "Virtual Reality: The Future of Gaming",
    "Sustainable Living Guide",
];

const TAG_POOL: &[&str] = &[
    "tutorial", "review", "guide", "beginners", "tips", "howto", "tech",
    "gaming", "cooking", "science", "travel", "music", "fitness", "diy",
];

/// Deterministic stand-in for a live video provider.
///
/// Generates plausible records from fixed channel/category/title pools with
/// hash-mixed statistics, so seeded catalogs and tests are reproducible.
/// Ids stay unique across calls through a per-source counter.
#[derive(Debug, Default)]
pub struct SyntheticSource {
    counter: AtomicU64,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate(&self, count: usize, category_id: Option<&str>) -> Vec<Video> {
        (0..count).map(|_| self.generate_one(category_id)).collect()
    }

    fn generate_one(&self, category_id: Option<&str>) -> Video {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let seed = mix(n);

        let (channel_id, channel_title) = CHANNELS[(seed % CHANNELS.len() as u64) as usize];
        let category = category_id
            .unwrap_or(CATEGORIES[(mix(seed) % CATEGORIES.len() as u64) as usize]);
        let title = TITLES[(n % TITLES.len() as u64) as usize];

        let view_count = 1_000 + mix(seed ^ 1) % 10_000_000;
        let like_count = view_count / (10 + mix(seed ^ 2) % 90);
        let comment_count = view_count / (100 + mix(seed ^ 3) % 900);

        let tag_a = TAG_POOL[(mix(seed ^ 4) % TAG_POOL.len() as u64) as usize];
        let tag_b = TAG_POOL[(mix(seed ^ 5) % TAG_POOL.len() as u64) as usize];
        let mut tags = vec![tag_a.to_string()];
        if tag_b != tag_a {
            tags.push(tag_b.to_string());
        }

        let minutes = 1 + mix(seed ^ 6) % 59;
        let seconds = mix(seed ^ 7) % 60;

        Video {
            id: format!("vid{n:06}"),
            title: title.to_string(),
            description: format!("{title} - from {channel_title}."),
            published_at: String::new(),
            channel_id: channel_id.to_string(),
            channel_title: channel_title.to_string(),
            category_id: category.to_string(),
            tags,
            duration: format!("PT{minutes}M{seconds}S"),
            view_count,
            like_count,
            comment_count,
            score: None,
        }
    }
}

/// splitmix64 finalizer; spreads a counter into well-mixed bits.
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

#[async_trait]
impl VideoSource for SyntheticSource {
    async fn search<'a>(
        &self,
        _query: &str,
        category_id: Option<&'a str>,
        max_results: usize,
    ) -> AppResult<Vec<Video>> {
        Ok(self.generate(max_results, category_id))
    }

    async fn trending<'a>(
        &self,
        category_id: Option<&'a str>,
        max_results: usize,
    ) -> AppResult<Vec<Video>> {
        Ok(self.generate(max_results, category_id))
    }

    async fn video(&self, _id: &str) -> AppResult<Option<Video>> {
        Ok(Some(self.generate_one(None)))
    }
}
