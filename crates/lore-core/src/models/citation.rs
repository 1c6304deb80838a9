use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference from an item to supporting source material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub id: String,
    /// Quoted snippet.
    pub text: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<Locator>,
    /// Frame the citation points at, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_id: Option<String>,
    pub accessed_at: DateTime<Utc>,
}

/// Where in the source the snippet lives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum Locator {
    Page(u32),
    /// Seconds into a time-based source.
    Timestamp(f64),
}
