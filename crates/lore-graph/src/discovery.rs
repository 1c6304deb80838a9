//! Similarity-based relationship discovery between items.

use tracing::{debug, info};

use lore_core::config::check_unit;
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{
    Entity, Modality, RelationType, Relationship, SearchTarget, VectorQuery,
};
use lore_core::traits::IKnowledgeStore;
use lore_core::Deadline;

const OPERATION: &str = "traversal.discover_relationships";

/// Parameters for [`discover_relationships`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoveryOptions {
    /// Neighbours must score strictly above this.
    pub min_similarity: f64,
    /// Maximum neighbours linked per call.
    pub limit: usize,
    /// Also write the reverse edge for each neighbour.
    pub bidirectional: bool,
}

impl DiscoveryOptions {
    pub fn new(min_similarity: f64, limit: usize) -> Self {
        Self {
            min_similarity,
            limit,
            bidirectional: false,
        }
    }

    pub fn bidirectional(mut self) -> Self {
        self.bidirectional = true;
        self
    }
}

/// Link `item_id` to its nearest items by text embedding with `similar_to`
/// edges. Edge timestamps are the later of the two items' creation times,
/// so rerunning discovery over unchanged items writes nothing new.
pub fn discover_relationships<S: IKnowledgeStore + ?Sized>(
    store: &S,
    item_id: &str,
    options: DiscoveryOptions,
    deadline: Deadline,
) -> LoreResult<Vec<Relationship>> {
    check_unit("min_similarity", options.min_similarity)?;
    if options.limit == 0 {
        return Err(LoreError::invalid("limit must be greater than zero"));
    }
    deadline.check(OPERATION)?;

    let item = store.get(item_id)?.into_item()?;
    let query = VectorQuery::new(item.embedding.clone(), Modality::Text, SearchTarget::Items)
        .threshold(options.min_similarity)
        // The item itself always matches; fetch one extra to make room for it.
        .limit(options.limit.saturating_add(1));
    let candidates = store.vector_search(&query)?;

    let mut created = Vec::new();
    let mut linked = 0;
    for candidate in candidates {
        if linked >= options.limit {
            break;
        }
        let neighbour_id = candidate.entity.id();
        if neighbour_id == item.id {
            continue;
        }
        deadline.check(OPERATION)?;

        let created_at = item.created_at.max(candidate.entity.created_at());
        let similarity = candidate.similarity.clamp(0.0, 1.0);
        let mut pairs = vec![(item.id.clone(), neighbour_id.clone())];
        if options.bidirectional {
            pairs.push((neighbour_id.clone(), item.id.clone()));
        }
        for (source_id, target_id) in pairs {
            let edge = Relationship {
                source_id,
                target_id,
                relation_type: RelationType::SimilarTo,
                similarity,
                created_at,
            };
            store.upsert(&Entity::Relationship(edge.clone()))?;
            debug!(edge = %edge.id(), similarity, "relationship discovered");
            created.push(edge);
        }
        linked += 1;
    }

    info!(item_id, linked, "relationship discovery complete");
    Ok(created)
}
