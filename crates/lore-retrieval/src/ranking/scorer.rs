//! Weighted composite relevance.

use lore_core::config::{CompositeBound, FusionWeights};

/// `text·wt + visual·wv + scene_bonus`. The bonus is already weighted.
pub fn composite(weights: &FusionWeights, text: f64, visual: f64, scene_bonus: f64) -> f64 {
    weights.text * text + weights.visual * visual + scene_bonus
}

/// Shape a raw composite for reporting.
pub fn bounded(bound: CompositeBound, weights: &FusionWeights, raw: f64) -> f64 {
    match bound {
        CompositeBound::Clamp => raw.clamp(0.0, 1.0),
        CompositeBound::Renormalize => {
            let max = weights.max_composite();
            if max > 0.0 {
                (raw / max).clamp(0.0, 1.0)
            } else {
                0.0
            }
        }
        CompositeBound::Unbounded => raw,
    }
}
