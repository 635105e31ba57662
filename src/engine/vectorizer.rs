use std::collections::HashMap;

use tracing::{debug, warn};

use super::store::VideoStore;
use crate::models::Video;

/// Common English stop words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "before", "being",
    "below", "between", "both", "but", "by", "can", "did", "do", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had",
    "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "you", "your",
];

/// Derived TF-IDF index over the catalog's text fields.
///
/// Rebuilt wholesale on every catalog mutation; between rebuilds it is
/// immutable. When the catalog is too small or the vocabulary comes up empty
/// the index is simply unavailable and recommenders fall back to the manual
/// feature scorer.
#[derive(Debug)]
pub struct ContentVectorizer {
    max_terms: usize,
    index: Option<Index>,
}

#[derive(Debug)]
struct Index {
    /// Video ids in catalog order, parallel to `vectors`.
    video_ids: Vec<String>,
    /// Position of each video id in `video_ids`.
    positions: HashMap<String, usize>,
    /// Sparse L2-normalized TF-IDF vectors, term id -> weight.
    vectors: Vec<HashMap<u32, f64>>,
}

impl ContentVectorizer {
    /// Creates an empty vectorizer with a bounded vocabulary.
    pub fn new(max_terms: usize) -> Self {
        Self {
            max_terms,
            index: None,
        }
    }

    /// True when a similarity query can be served from the index.
    pub fn is_available(&self) -> bool {
        self.index.is_some()
    }

    /// Recomputes the whole index from the current catalog.
    ///
    /// Never fails outward: degenerate inputs (fewer than two documents, or
    /// documents with no usable terms) leave the index unavailable.
    pub fn rebuild(&mut self, store: &VideoStore) {
        self.index = None;

        if store.len() < 2 {
            debug!(
                videos = store.len(),
                "catalog too small for content index"
            );
            return;
        }

        let mut video_ids = Vec::with_capacity(store.len());
        let mut documents = Vec::with_capacity(store.len());
        for video in store.iter() {
            video_ids.push(video.id.clone());
            documents.push(tokenize(&document_text(video)));
        }

        // Corpus-wide term counts drive the vocabulary cap; document
        // frequency drives idf.
        let mut corpus_counts: HashMap<String, u64> = HashMap::new();
        let mut doc_frequency: HashMap<String, u64> = HashMap::new();
        for tokens in &documents {
            let mut seen: HashMap<&str, ()> = HashMap::new();
            for token in tokens {
                *corpus_counts.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.as_str(), ()).is_none() {
                    *doc_frequency.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        if corpus_counts.is_empty() {
            warn!("content index unavailable: empty vocabulary");
            return;
        }

        // Keep the most frequent terms; ties resolve alphabetically so
        // rebuilds over the same catalog are identical.
        let mut ranked: Vec<(&String, &u64)> = corpus_counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_terms);

        let vocabulary: HashMap<&str, u32> = ranked
            .iter()
            .enumerate()
            .map(|(i, (term, _))| (term.as_str(), i as u32))
            .collect();

        let doc_count = documents.len() as f64;
        let idf: HashMap<u32, f64> = vocabulary
            .iter()
            .map(|(term, &id)| {
                let df = doc_frequency[*term] as f64;
                (id, ((1.0 + doc_count) / (1.0 + df)).ln() + 1.0)
            })
            .collect();

        let vectors: Vec<HashMap<u32, f64>> = documents
            .iter()
            .map(|tokens| weigh_document(tokens, &vocabulary, &idf))
            .collect();

        let positions = video_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        debug!(
            videos = video_ids.len(),
            terms = vocabulary.len(),
            "rebuilt content index"
        );

        self.index = Some(Index {
            video_ids,
            positions,
            vectors,
        });
    }

    /// Cosine similarity of every other catalog video against the source,
    /// in catalog order. `None` when the index is unavailable or the source
    /// id is not indexed.
    pub fn similarity(&self, source_id: &str) -> Option<Vec<(String, f64)>> {
        let index = self.index.as_ref()?;
        let source_pos = *index.positions.get(source_id)?;
        let source = &index.vectors[source_pos];

        let scores = index
            .video_ids
            .iter()
            .zip(&index.vectors)
            .filter(|(id, _)| id.as_str() != source_id)
            .map(|(id, vector)| (id.clone(), sparse_dot(source, vector)))
            .collect();
        Some(scores)
    }
}

/// Concatenates the text fields that describe a video. Empty fields
/// contribute nothing.
fn document_text(video: &Video) -> String {
    let mut parts: Vec<&str> = vec![
        &video.title,
        &video.description,
        &video.channel_title,
        &video.category_id,
    ];
    parts.extend(video.tags.iter().map(String::as_str));
    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

/// Lowercase alphanumeric tokens of at least two characters, stop words
/// removed, followed by the bigrams of the surviving sequence.
fn tokenize(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() >= 2 && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect();

    let mut tokens = words.clone();
    for pair in words.windows(2) {
        tokens.push(format!("{} {}", pair[0], pair[1]));
    }
    tokens
}

/// Builds one L2-normalized TF-IDF vector.
fn weigh_document(
    tokens: &[String],
    vocabulary: &HashMap<&str, u32>,
    idf: &HashMap<u32, f64>,
) -> HashMap<u32, f64> {
    let mut vector: HashMap<u32, f64> = HashMap::new();
    for token in tokens {
        if let Some(&term_id) = vocabulary.get(token.as_str()) {
            *vector.entry(term_id).or_insert(0.0) += 1.0;
        }
    }
    for (term_id, weight) in vector.iter_mut() {
        *weight *= idf[term_id];
    }

    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

/// Dot product of two sparse vectors. Both are L2-normalized, so this is
/// cosine similarity, and non-negative weights keep it in [0, 1].
fn sparse_dot(a: &HashMap<u32, f64>, b: &HashMap<u32, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term_id, w)| large.get(term_id).map(|v| w * v))
        .sum::<f64>()
        .clamp(0.0, 1.0)
}
