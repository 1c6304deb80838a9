use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_type::ContentType;
use crate::constants::SYNTHESIZED_ID_PREFIX;

/// A knowledge entity merged from a cluster of validated findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesizedEntity {
    pub id: String,
    pub content_type: ContentType,
    pub content: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Contributing finding ids, sorted.
    pub provenance: Vec<String>,
    /// Mean of member confidences.
    pub confidence: f64,
    /// Centroid of member text embeddings; empty when no member had one.
    #[serde(default)]
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

impl SynthesizedEntity {
    /// Deterministic id for a provenance set, independent of member order.
    pub fn derive_id(provenance: &[String]) -> String {
        let mut members: Vec<&str> = provenance.iter().map(String::as_str).collect();
        members.sort_unstable();
        members.dedup();
        let mut hasher = blake3::Hasher::new();
        for member in members {
            hasher.update(member.as_bytes());
            hasher.update(&[0]);
        }
        let hash = hasher.finalize().to_hex();
        format!("{SYNTHESIZED_ID_PREFIX}{}", &hash[..32])
    }

    /// Concept label used when the entity is a graph node: its first topic,
    /// or its id when it has none.
    pub fn concept(&self) -> &str {
        self.topics.first().map(String::as_str).unwrap_or(&self.id)
    }
}
