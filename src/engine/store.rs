use std::collections::BTreeMap;

use crate::models::Video;

/// The ground-truth catalog: video id -> record.
///
/// Backed by a `BTreeMap` so iteration order is ascending id. That order is
/// load-bearing: recommenders use it as the tie-break for equal scores.
#[derive(Debug, Default)]
pub struct VideoStore {
    videos: BTreeMap<String, Video>,
}

impl VideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a record by id. A re-add replaces the prior
    /// record wholesale; there is no field-level merge.
    pub fn insert(&mut self, video: Video) {
        self.videos.insert(video.id.clone(), video);
    }

    pub fn get(&self, id: &str) -> Option<&Video> {
        self.videos.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.videos.contains_key(id)
    }

    /// Iterates the catalog in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Video> {
        self.videos.values()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
