use serde::{Deserialize, Serialize};

use super::defaults;

/// Relationship traversal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub default_min_similarity: f64,
    pub default_max_depth: usize,
    /// Depth ceiling applied whatever the caller asks for.
    pub depth_cap: usize,
    /// Qualifying edges followed per node, strongest first.
    pub max_fanout: usize,
    /// Total edges collected before the traversal stops.
    pub max_edges: usize,
    /// Paths returned by a path search before it stops.
    pub max_paths: usize,
    /// Hops followed from `related_to` in a hybrid search.
    pub default_relation_depth: usize,
    /// Relevance of a graph-related hit before its confidence is applied.
    pub related_base_score: f64,
    /// Relevance lost per node on the path to a graph-related hit.
    pub path_length_penalty: f64,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            default_min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
            default_max_depth: defaults::DEFAULT_MAX_DEPTH,
            depth_cap: defaults::DEFAULT_DEPTH_CAP,
            max_fanout: defaults::DEFAULT_MAX_FANOUT,
            max_edges: defaults::DEFAULT_MAX_EDGES,
            max_paths: defaults::DEFAULT_MAX_PATHS,
            default_relation_depth: defaults::DEFAULT_RELATION_DEPTH,
            related_base_score: defaults::DEFAULT_RELATED_BASE_SCORE,
            path_length_penalty: defaults::DEFAULT_PATH_LENGTH_PENALTY,
        }
    }
}
