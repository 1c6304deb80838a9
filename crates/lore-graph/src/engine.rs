//! TraversalEngine: store-backed entry point for traversal and discovery.

use std::sync::Arc;

use tracing::info_span;

use lore_core::config::TraversalConfig;
use lore_core::errors::LoreResult;
use lore_core::models::Relationship;
use lore_core::traits::{IGraphStore, IKnowledgeStore};
use lore_core::Deadline;

use crate::discovery::{self, DiscoveryOptions};
use crate::hybrid::{self, HybridQuery, HybridResult};
use crate::paths::{self, PathSearchResult};
use crate::traversal::{self, TraversalResult};

pub struct TraversalEngine<S> {
    store: Arc<S>,
    config: TraversalConfig,
}

impl<S> TraversalEngine<S>
where
    S: IKnowledgeStore + IGraphStore,
{
    pub fn new(store: Arc<S>, config: TraversalConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Concepts reachable from `start_concept` within `max_depth` hops along
    /// edges with similarity `>= min_similarity`.
    pub fn related_concepts(
        &self,
        start_concept: &str,
        min_similarity: f64,
        max_depth: usize,
        deadline: Deadline,
    ) -> LoreResult<TraversalResult> {
        let _span = info_span!("lore.traversal", start_concept, max_depth).entered();
        traversal::expand(
            self.store.as_ref(),
            start_concept,
            min_similarity,
            max_depth,
            &self.config,
            deadline,
        )
    }

    /// [`related_concepts`](Self::related_concepts) with configured defaults.
    pub fn related_concepts_default(
        &self,
        start_concept: &str,
        deadline: Deadline,
    ) -> LoreResult<TraversalResult> {
        self.related_concepts(
            start_concept,
            self.config.default_min_similarity,
            self.config.default_max_depth,
            deadline,
        )
    }

    pub fn discover_relationships(
        &self,
        item_id: &str,
        options: DiscoveryOptions,
        deadline: Deadline,
    ) -> LoreResult<Vec<Relationship>> {
        let _span = info_span!("lore.discovery", item_id).entered();
        discovery::discover_relationships(self.store.as_ref(), item_id, options, deadline)
    }

    /// Simple paths from `start_id` to `end_id` of at most `max_depth` edges.
    pub fn paths_between(
        &self,
        start_id: &str,
        end_id: &str,
        max_depth: usize,
        deadline: Deadline,
    ) -> LoreResult<PathSearchResult> {
        let _span = info_span!("lore.traversal.paths", start_id, end_id, max_depth).entered();
        paths::paths_between(
            self.store.as_ref(),
            start_id,
            end_id,
            max_depth,
            &self.config,
            deadline,
        )
    }

    pub fn hybrid_search(&self, query: &HybridQuery, deadline: Deadline) -> LoreResult<HybridResult> {
        let _span = info_span!(
            "lore.traversal.hybrid",
            limit = query.limit,
            related_to = query.related_to.as_deref()
        )
        .entered();
        hybrid::hybrid_search(self.store.as_ref(), query, &self.config, deadline)
    }
}
