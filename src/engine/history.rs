use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// One watch event. At most one entry exists per (user, video); a repeat
/// watch replaces the earlier entry's timestamp and percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub video_id: String,
    pub timestamp: DateTime<Utc>,
    pub watched_percentage: f64,
}

/// Per-user chronological watch history.
#[derive(Debug, Default)]
pub struct WatchHistoryStore {
    entries: HashMap<String, Vec<HistoryEntry>>,
}

impl WatchHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a watch. Percentage is clamped to [0, 100]; an earlier entry
    /// for the same video is dropped first so the pair stays unique.
    pub fn add(
        &mut self,
        user_id: &str,
        video_id: &str,
        timestamp: DateTime<Utc>,
        watched_percentage: f64,
    ) {
        let entries = self.entries.entry(user_id.to_string()).or_default();
        entries.retain(|e| e.video_id != video_id);
        entries.push(HistoryEntry {
            video_id: video_id.to_string(),
            timestamp,
            watched_percentage: watched_percentage.clamp(0.0, 100.0),
        });
    }

    /// The user's entries, newest first. Empty for unknown users.
    pub fn for_user(&self, user_id: &str) -> Vec<HistoryEntry> {
        let mut entries = self
            .entries
            .get(user_id)
            .cloned()
            .unwrap_or_default();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    pub fn has_history(&self, user_id: &str) -> bool {
        self.entries
            .get(user_id)
            .is_some_and(|entries| !entries.is_empty())
    }

    /// Watched video ids for a user, unordered.
    pub fn watched_ids(&self, user_id: &str) -> Vec<&str> {
        self.entries
            .get(user_id)
            .map(|entries| entries.iter().map(|e| e.video_id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Users with at least one entry, excluding `user_id`.
    pub fn other_users(&self, user_id: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(id, entries)| id.as_str() != user_id && !entries.is_empty())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Raw entries for a user, unsorted. Used by the collaborative path.
    pub fn entries(&self, user_id: &str) -> &[HistoryEntry] {
        self.entries
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn clear_user(&mut self, user_id: &str) {
        self.entries.remove(user_id);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }
}
