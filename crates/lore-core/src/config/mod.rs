pub mod defaults;
mod embedding_config;
mod retrieval_config;
mod runtime_config;
mod storage_config;
mod synthesis_config;
mod traversal_config;
mod validation_config;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use retrieval_config::{CompositeBound, FusionWeights, RetrievalConfig};
pub use runtime_config::RuntimeConfig;
pub use storage_config::StorageConfig;
pub use synthesis_config::SynthesisConfig;
pub use traversal_config::TraversalConfig;
pub use validation_config::{TemporalRuleConfig, ValidationConfig};

use crate::constants::{MAX_SYNTHESIS_BATCH, MAX_TRAVERSAL_DEPTH};
use crate::errors::{LoreError, LoreResult};
use crate::models::ContentType;

/// Aggregate configuration for every lore subsystem.
///
/// Passed into each engine at construction; nothing reads configuration
/// from global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub traversal: TraversalConfig,
    pub validation: ValidationConfig,
    pub synthesis: SynthesisConfig,
    pub runtime: RuntimeConfig,
}

impl LoreConfig {
    /// Parse a TOML document, filling omitted fields with defaults, and validate it.
    pub fn from_toml(toml_str: &str) -> LoreResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| LoreError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &std::path::Path) -> LoreResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| LoreError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    /// Reject values no engine can run with.
    pub fn validate(&self) -> LoreResult<()> {
        if self.embedding.text_dimensions == 0 || self.embedding.visual_dimensions == 0 {
            return Err(LoreError::invalid("embedding dimensions must be positive"));
        }
        if self.storage.read_pool_size == 0 {
            return Err(LoreError::invalid("storage.read_pool_size must be positive"));
        }
        for key in self.storage.required_extensions.keys() {
            ContentType::parse(key)?;
        }

        check_weights("retrieval.weights", &self.retrieval.weights)?;
        check_unit("retrieval.default_threshold", self.retrieval.default_threshold)?;
        if self.retrieval.default_limit == 0 {
            return Err(LoreError::invalid("retrieval.default_limit must be positive"));
        }

        check_unit(
            "traversal.default_min_similarity",
            self.traversal.default_min_similarity,
        )?;
        if self.traversal.depth_cap == 0 || self.traversal.depth_cap > MAX_TRAVERSAL_DEPTH {
            return Err(LoreError::invalid(format!(
                "traversal.depth_cap must be within 1..={MAX_TRAVERSAL_DEPTH}"
            )));
        }
        if self.traversal.max_fanout == 0
            || self.traversal.max_edges == 0
            || self.traversal.max_paths == 0
        {
            return Err(LoreError::invalid(
                "traversal.max_fanout, traversal.max_edges and traversal.max_paths must be positive",
            ));
        }
        check_unit("traversal.related_base_score", self.traversal.related_base_score)?;
        check_unit("traversal.path_length_penalty", self.traversal.path_length_penalty)?;

        let v = &self.validation;
        check_unit("validation.min_overall_score", v.min_overall_score)?;
        check_unit("validation.source_reliability_floor", v.source_reliability_floor)?;
        check_unit("validation.consistency_floor", v.consistency_floor)?;
        check_unit("validation.multimodal_floor", v.multimodal_floor)?;
        check_weights("validation.weights", &v.weights)?;
        if v.min_content_length == 0 {
            return Err(LoreError::invalid(
                "validation.min_content_length must be positive",
            ));
        }
        if v.temporal.max_age_days == 0 {
            return Err(LoreError::invalid(
                "validation.temporal.max_age_days must be positive",
            ));
        }

        check_unit("synthesis.min_confidence", self.synthesis.min_confidence)?;
        check_unit(
            "synthesis.neighbour_search_floor",
            self.synthesis.neighbour_search_floor,
        )?;
        if self.synthesis.batch_size == 0 || self.synthesis.batch_size > MAX_SYNTHESIS_BATCH {
            return Err(LoreError::invalid(format!(
                "synthesis.batch_size must be within 1..={MAX_SYNTHESIS_BATCH}"
            )));
        }

        if self.runtime.max_concurrent_validations == 0
            || self.runtime.max_concurrent_synthesis == 0
        {
            return Err(LoreError::invalid(
                "runtime concurrency limits must be positive",
            ));
        }
        Ok(())
    }
}

/// Reject a value outside `[0, 1]` (NaN included).
pub fn check_unit(field: &str, value: f64) -> LoreResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LoreError::invalid(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

fn check_weights(field: &str, weights: &FusionWeights) -> LoreResult<()> {
    let all = [weights.text, weights.visual, weights.scene_change];
    if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(LoreError::invalid(format!(
            "{field} must be finite and non-negative"
        )));
    }
    if weights.text + weights.visual <= 0.0 {
        return Err(LoreError::invalid(format!(
            "{field}: text and visual weights cannot both be zero"
        )));
    }
    Ok(())
}
