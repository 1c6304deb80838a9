//! Composite scoring and deterministic ordering.

pub mod scorer;

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use lore_core::config::{CompositeBound, FusionWeights};
use lore_core::models::KnowledgeFragment;

pub use scorer::{bounded, composite};

/// A fragment with the per-modality scores that produced its rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFragment {
    pub fragment: KnowledgeFragment,
    /// Reported score, shaped by the configured [`CompositeBound`].
    pub composite_score: f64,
    /// Unbounded weighted sum; the ordering key.
    pub raw_score: f64,
    pub text_similarity: f64,
    pub visual_similarity: f64,
    pub scene_bonus: f64,
}

/// A candidate awaiting composite scoring.
#[derive(Debug, Clone)]
pub struct ScoringInput {
    pub fragment: KnowledgeFragment,
    pub text_similarity: f64,
    pub visual_similarity: f64,
}

pub struct RankingPipeline {
    weights: FusionWeights,
    bound: CompositeBound,
}

impl RankingPipeline {
    pub fn new(weights: FusionWeights, bound: CompositeBound) -> Self {
        Self { weights, bound }
    }

    /// Score every input, order best first, keep at most `limit`.
    pub fn rank(
        &self,
        inputs: Vec<ScoringInput>,
        time_filter_active: bool,
        limit: usize,
    ) -> Vec<RankedFragment> {
        let mut ranked: Vec<RankedFragment> = inputs
            .into_par_iter()
            .map(|input| {
                let scene_bonus = if input.fragment.scene_change && time_filter_active {
                    self.weights.scene_change
                } else {
                    0.0
                };
                let raw_score = composite(
                    &self.weights,
                    input.text_similarity,
                    input.visual_similarity,
                    scene_bonus,
                );
                RankedFragment {
                    composite_score: bounded(self.bound, &self.weights, raw_score),
                    raw_score,
                    text_similarity: input.text_similarity,
                    visual_similarity: input.visual_similarity,
                    scene_bonus,
                    fragment: input.fragment,
                }
            })
            .collect();

        ranked.sort_by(compare);
        ranked.truncate(limit);
        ranked
    }
}

/// Raw composite desc, text similarity desc, created_at asc, id asc.
pub fn compare(a: &RankedFragment, b: &RankedFragment) -> Ordering {
    b.raw_score
        .total_cmp(&a.raw_score)
        .then_with(|| b.text_similarity.total_cmp(&a.text_similarity))
        .then_with(|| a.fragment.created_at.cmp(&b.fragment.created_at))
        .then_with(|| a.fragment.id.cmp(&b.fragment.id))
}
