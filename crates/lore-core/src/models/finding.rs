use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_type::ContentType;

/// A raw finding produced by an upstream research collaborator,
/// before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFinding {
    pub id: String,
    pub content: String,
    pub content_type: ContentType,
    pub evidence_score: f64,
    pub novelty_score: f64,
    #[serde(default)]
    pub embeddings: EmbeddingPair,
    /// Embeddings of the query that surfaced this finding, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<EmbeddingPair>,
    pub source: SourceMetadata,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Optional text and visual embeddings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<Vec<f32>>,
}

impl EmbeddingPair {
    pub fn text(text: Vec<f32>) -> Self {
        Self {
            text: Some(text),
            visual: None,
        }
    }

    pub fn both(text: Vec<f32>, visual: Vec<f32>) -> Self {
        Self {
            text: Some(text),
            visual: Some(visual),
        }
    }
}

/// Where a finding came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub source_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default)]
    pub kind: SourceKind,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Academic,
    Web,
    Video,
    Internal,
    #[default]
    Other,
}
