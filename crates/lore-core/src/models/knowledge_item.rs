use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_type::ContentType;
use super::extension::ExtensionMap;

/// Atomic unit of extracted knowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: String,
    /// Opaque reference to the source document or video.
    pub source_ref: String,
    /// Concept label; traversal starts from every item carrying it.
    pub concept: String,
    pub content: String,
    pub content_type: ContentType,
    pub evidence_score: f64,
    pub novelty_score: f64,
    /// Ordered citation ids. Each must already exist when the item is written.
    #[serde(default)]
    pub citations: Vec<String>,
    /// Text embedding.
    pub embedding: Vec<f32>,
    pub category: String,
    /// Present exactly when `content_type` is `Video`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoDetails>,
    #[serde(default)]
    pub extensions: ExtensionMap,
    pub created_at: DateTime<Utc>,
}

impl KnowledgeItem {
    pub fn is_video(&self) -> bool {
        self.content_type == ContentType::Video
    }
}

/// Long-form video specifics carried by video items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetails {
    pub summary: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub metadata: VideoMetadata,
}

/// The four mandatory video descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub duration_secs: f64,
    pub frame_rate: f64,
    pub resolution: Resolution,
    pub codec: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}
