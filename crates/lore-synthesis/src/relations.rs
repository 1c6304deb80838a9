//! `similar_to` links for freshly synthesized entities.
//!
//! Internal links join new entities to each other in both directions;
//! external links run from a new entity to stored items and synthesized
//! entities it resembles. Edge timestamps are the later of the endpoints'
//! creation times, so relinking the same entities rewrites nothing.

use std::collections::HashSet;

use rayon::prelude::*;

use lore_core::config::SynthesisConfig;
use lore_core::errors::LoreResult;
use lore_core::models::{
    Modality, RelationType, Relationship, SearchTarget, SynthesizedEntity, VectorQuery,
};
use lore_core::similarity::similarity;
use lore_core::traits::IKnowledgeStore;
use lore_core::Deadline;

const OPERATION: &str = "synthesis.relations";

/// Edges between new entities whose embeddings reach `min_similarity`,
/// one per direction, ordered by source then target.
pub fn internal_relations(entities: &[SynthesizedEntity], min_similarity: f64) -> Vec<Relationship> {
    let n = entities.len();
    let mut edges: Vec<Relationship> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let a = &entities[i];
            (i + 1..n).filter_map(move |j| {
                let b = &entities[j];
                if a.id == b.id || a.embedding.is_empty() || a.embedding.len() != b.embedding.len()
                {
                    return None;
                }
                let sim = similarity(&a.embedding, &b.embedding);
                (sim >= min_similarity).then_some((i, j, sim))
            })
        })
        .flat_map_iter(|(i, j, sim)| {
            let (a, b) = (&entities[i], &entities[j]);
            let forward = Relationship {
                source_id: a.id.clone(),
                target_id: b.id.clone(),
                relation_type: RelationType::SimilarTo,
                similarity: sim,
                created_at: a.created_at.max(b.created_at),
            };
            let backward = Relationship {
                source_id: b.id.clone(),
                target_id: a.id.clone(),
                ..forward.clone()
            };
            [forward, backward]
        })
        .collect();
    sort_edges(&mut edges);
    edges
}

/// Edges from each new entity to stored neighbours at or above
/// `config.min_confidence`. Neighbours come from a text search over items
/// and synthesized entities with `config.neighbour_search_floor` as its
/// threshold and `config.batch_size` as its limit. Members of `entities`
/// are never external neighbours.
pub fn external_relations<S: IKnowledgeStore + ?Sized>(
    entities: &[SynthesizedEntity],
    store: &S,
    config: &SynthesisConfig,
    deadline: Deadline,
) -> LoreResult<Vec<Relationship>> {
    let new_ids: HashSet<&str> = entities.iter().map(|e| e.id.as_str()).collect();
    let mut edges = Vec::new();

    for entity in entities.iter().filter(|e| !e.embedding.is_empty()) {
        for target in [SearchTarget::Items, SearchTarget::Synthesized] {
            deadline.check(OPERATION)?;
            let query = VectorQuery::new(entity.embedding.clone(), Modality::Text, target)
                .threshold(config.neighbour_search_floor)
                .limit(config.batch_size);
            for candidate in store.vector_search(&query)? {
                let neighbour_id = candidate.entity.id();
                if new_ids.contains(neighbour_id.as_str())
                    || candidate.similarity < config.min_confidence
                {
                    continue;
                }
                edges.push(Relationship {
                    source_id: entity.id.clone(),
                    target_id: neighbour_id,
                    relation_type: RelationType::SimilarTo,
                    similarity: candidate.similarity,
                    created_at: entity.created_at.max(candidate.entity.created_at()),
                });
            }
        }
    }
    sort_edges(&mut edges);
    Ok(edges)
}

fn sort_edges(edges: &mut [Relationship]) {
    edges.sort_by(|a, b| {
        a.source_id
            .cmp(&b.source_id)
            .then_with(|| a.target_id.cmp(&b.target_id))
    });
}
