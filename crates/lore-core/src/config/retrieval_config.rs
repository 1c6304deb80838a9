use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-modality weights of the composite relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub text: f64,
    pub visual: f64,
    /// Added once when a fragment marks a scene change and a time filter is active.
    pub scene_change: f64,
}

impl FusionWeights {
    /// Sum of every term that can contribute to a composite score.
    pub fn max_composite(&self) -> f64 {
        self.text + self.visual + self.scene_change
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            text: defaults::DEFAULT_TEXT_WEIGHT,
            visual: defaults::DEFAULT_VISUAL_WEIGHT,
            scene_change: defaults::DEFAULT_SCENE_CHANGE_WEIGHT,
        }
    }
}

/// How a composite score above 1.0 is reported.
///
/// Ranking always uses the raw composite; this only shapes the reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeBound {
    #[default]
    Clamp,
    Renormalize,
    Unbounded,
}

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub weights: FusionWeights,
    pub composite_bound: CompositeBound,
    /// Threshold used by callers that do not supply one.
    pub default_threshold: f64,
    /// Limit used by callers that do not supply one.
    pub default_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            weights: FusionWeights::default(),
            composite_bound: CompositeBound::default(),
            default_threshold: defaults::DEFAULT_SEARCH_THRESHOLD,
            default_limit: defaults::DEFAULT_SEARCH_LIMIT,
        }
    }
}
