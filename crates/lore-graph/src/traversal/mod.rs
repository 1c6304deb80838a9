//! Concept traversal types and the BFS expansion.

pub mod bfs;

use serde::{Deserialize, Serialize};

use lore_core::models::RelationType;

pub use bfs::expand;

/// One traversed edge, labelled with both endpoints' concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptPath {
    pub source_id: String,
    pub source_concept: String,
    pub target_id: String,
    pub target_concept: String,
    pub relation_type: RelationType,
    pub similarity: f64,
    /// BFS level at which the edge was traversed, starting at 1.
    pub depth: usize,
}

/// Result of expanding from a start concept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalResult {
    pub start_concept: String,
    /// Ordered by depth, then similarity descending, then source and target id.
    pub paths: Vec<ConceptPath>,
    pub max_depth_reached: usize,
    /// A fan-out, edge or depth cap cut the expansion short.
    pub truncated: bool,
    /// Item groups that form cycles among the traversed edges.
    pub cyclic_components: Vec<Vec<String>>,
}

impl TraversalResult {
    pub fn empty(start_concept: &str) -> Self {
        Self {
            start_concept: start_concept.to_string(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Distinct target concepts in result order.
    pub fn concepts(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.paths
            .iter()
            .map(|p| p.target_concept.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}
