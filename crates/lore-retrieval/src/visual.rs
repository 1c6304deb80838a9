//! Visual similarity of a fragment against a visual query.

use lore_core::models::{KnowledgeFragment, VideoFrame};
use lore_core::similarity::similarity;

/// Best similarity between `query` and any of the fragment's frames or its
/// own visual embeddings. Scores at or below `threshold` count as 0.
pub fn visual_similarity(
    query: &[f32],
    fragment: &KnowledgeFragment,
    frames: &[VideoFrame],
    threshold: f64,
) -> f64 {
    let best = frames
        .iter()
        .map(|f| f.embedding.as_slice())
        .chain(fragment.visual_embeddings.iter().map(Vec::as_slice))
        .map(|embedding| similarity(query, embedding))
        .fold(0.0f64, f64::max);
    if best > threshold {
        best
    } else {
        0.0
    }
}
