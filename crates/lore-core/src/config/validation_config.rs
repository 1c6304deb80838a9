use serde::{Deserialize, Serialize};

use super::defaults;
use super::retrieval_config::FusionWeights;

/// Optional recency rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalRuleConfig {
    pub enabled: bool,
    pub max_age_days: u32,
}

impl Default for TemporalRuleConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_TEMPORAL_RULE_ENABLED,
            max_age_days: defaults::DEFAULT_MAX_AGE_DAYS,
        }
    }
}

/// Validator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Aggregate score required for acceptance.
    pub min_overall_score: f64,
    /// Minimum content length in characters.
    pub min_content_length: usize,
    pub source_reliability_floor: f64,
    /// Evidence and novelty may not both fall below this.
    pub consistency_floor: f64,
    /// Fused similarity-to-query required when both modalities are present.
    pub multimodal_floor: f64,
    /// Modality weights for the fused similarity.
    pub weights: FusionWeights,
    pub temporal: TemporalRuleConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_overall_score: defaults::DEFAULT_MIN_OVERALL_SCORE,
            min_content_length: defaults::DEFAULT_MIN_CONTENT_LENGTH,
            source_reliability_floor: defaults::DEFAULT_SOURCE_RELIABILITY_FLOOR,
            consistency_floor: defaults::DEFAULT_CONSISTENCY_FLOOR,
            multimodal_floor: defaults::DEFAULT_MULTIMODAL_FLOOR,
            weights: FusionWeights::default(),
            temporal: TemporalRuleConfig::default(),
        }
    }
}
