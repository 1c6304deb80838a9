use serde::{Deserialize, Serialize};

use super::content_type::ContentType;
use super::entity::Entity;

/// Embedding space a query vector lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Visual,
}

/// Which entities a vector search scans.
///
/// Valid pairings: text with items, fragments or synthesized entities,
/// visual with fragments (their own visual embeddings) or frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTarget {
    Items,
    Fragments,
    Frames,
    Synthesized,
}

/// Closed time window in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether `[start, end]` lies entirely inside this window.
    pub fn encloses(&self, start: f64, end: f64) -> bool {
        start >= self.start && end <= self.end
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }
}

/// Conjunction of optional predicates applied to search candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub min_confidence: Option<f64>,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
}

impl SearchFilters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn min_confidence(mut self, min: f64) -> Self {
        self.min_confidence = Some(min);
        self
    }

    pub fn time_range(mut self, start: f64, end: f64) -> Self {
        self.time_range = Some(TimeRange::new(start, end));
        self
    }
}

/// A single vector-similarity request against the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorQuery {
    pub vector: Vec<f32>,
    pub modality: Modality,
    pub target: SearchTarget,
    /// Candidates at or below this similarity are excluded.
    pub threshold: f64,
    pub limit: usize,
    #[serde(default)]
    pub filters: SearchFilters,
}

impl VectorQuery {
    pub fn new(vector: Vec<f32>, modality: Modality, target: SearchTarget) -> Self {
        Self {
            vector,
            modality,
            target,
            threshold: 0.0,
            limit: usize::MAX,
            filters: SearchFilters::default(),
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// A search hit: the full entity and its raw similarity in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub entity: Entity,
    pub similarity: f64,
}
