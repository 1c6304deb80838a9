use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_type::ContentType;

/// Time- or position-bounded slice of an item; the unit of search and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeFragment {
    pub id: String,
    /// Parent item id.
    pub item_id: String,
    pub content: String,
    /// Must equal the parent item's content type.
    pub content_type: ContentType,
    /// Seconds from the start of the parent. Both bounds or neither.
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub confidence: f64,
    /// Text embedding.
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub visual_embeddings: Vec<Vec<f32>>,
    #[serde(default)]
    pub scene_change: bool,
    #[serde(default)]
    pub motion_intensity: f64,
    pub created_at: DateTime<Utc>,
}

impl KnowledgeFragment {
    /// `(start, end)` when the fragment is time-bounded.
    pub fn span(&self) -> Option<(f64, f64)> {
        match (self.start_time, self.end_time) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}
