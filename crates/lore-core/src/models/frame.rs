use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A representative frame of a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFrame {
    pub id: String,
    pub fragment_id: String,
    /// Seconds from the start of the parent item.
    pub timestamp: f64,
    /// Opaque path or handle of the frame image.
    pub asset_path: String,
    /// Visual embedding.
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub detected_objects: Vec<DetectedObject>,
    /// How representative this frame is of its scene.
    pub scene_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub label: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

/// Normalized box, coordinates in `[0, 1]` of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
