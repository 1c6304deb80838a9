use serde::{Deserialize, Serialize};

use super::defaults;

/// Synthesizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Pairwise text similarity at which two findings join a cluster.
    pub min_confidence: f64,
    /// Findings clustered together at most; larger groups run in sequential batches.
    pub batch_size: usize,
    /// Link new entities to each other and to stored neighbours with
    /// `similar_to` edges after persisting.
    pub link_relations: bool,
    /// Similarity floor for the store search that gathers existing
    /// neighbours; only neighbours at or above `min_confidence` are linked.
    pub neighbour_search_floor: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            batch_size: defaults::DEFAULT_SYNTHESIS_BATCH_SIZE,
            link_relations: defaults::DEFAULT_LINK_RELATIONS,
            neighbour_search_floor: defaults::DEFAULT_NEIGHBOUR_SEARCH_FLOOR,
        }
    }
}
