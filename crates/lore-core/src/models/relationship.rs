use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::RELATIONSHIP_ID_SEPARATOR;

/// Directed typed edge between two graph nodes: knowledge items or
/// synthesized entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub source_id: String,
    pub target_id: String,
    pub relation_type: RelationType,
    /// Similarity or confidence of the link, in `[0, 1]`.
    pub similarity: f64,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    /// Edge id derived from its endpoints; at most one edge per ordered pair.
    pub fn edge_id(source_id: &str, target_id: &str) -> String {
        format!("{source_id}{RELATIONSHIP_ID_SEPARATOR}{target_id}")
    }

    pub fn id(&self) -> String {
        Self::edge_id(&self.source_id, &self.target_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    SimilarTo,
    Supports,
    Contradicts,
    DerivedFrom,
    PartOf,
    References,
    Related,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimilarTo => "similar_to",
            Self::Supports => "supports",
            Self::Contradicts => "contradicts",
            Self::DerivedFrom => "derived_from",
            Self::PartOf => "part_of",
            Self::References => "references",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
