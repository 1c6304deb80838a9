//! Connected components of the similarity graph.

pub mod union_find;

use rayon::prelude::*;

use lore_core::similarity::similarity;

pub use union_find::UnionFind;

/// Partition `embeddings` into clusters where every member reaches another
/// through pairs with similarity `>= min_similarity`. Entries without an
/// embedding are singletons. Clusters list member indices ascending and are
/// ordered by their first member.
pub fn cluster(embeddings: &[Option<&[f32]>], min_similarity: f64) -> Vec<Vec<usize>> {
    let n = embeddings.len();
    let edges: Vec<(usize, usize)> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let a = embeddings[i];
            (i + 1..n).filter_map(move |j| match (a, embeddings[j]) {
                (Some(a), Some(b)) if similarity(a, b) >= min_similarity => Some((i, j)),
                _ => None,
            })
        })
        .collect();

    let mut sets = UnionFind::new(n);
    for (i, j) in edges {
        sets.union(i, j);
    }
    sets.groups()
}
