//! Hybrid search: vector hits over items and synthesized entities, merged
//! with entities related to an anchor node in the graph.
//!
//! Direct hits score `(1 - rank / n) * confidence`. A related hit reached
//! through `k` nodes (anchor included) scores
//! `max(base * confidence, base - penalty * k)`. An entity found both ways
//! keeps its higher score.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lore_core::config::{check_unit, TraversalConfig};
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{Entity, Modality, SearchFilters, SearchTarget, VectorQuery};
use lore_core::traits::{IGraphStore, IKnowledgeStore};
use lore_core::Deadline;

const OPERATION: &str = "traversal.hybrid_search";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridQuery {
    /// Text-modality query vector; empty skips the vector search.
    pub vector: Vec<f32>,
    pub threshold: f64,
    pub limit: usize,
    /// Content type and confidence predicates, applied to both hit kinds.
    #[serde(default)]
    pub filters: SearchFilters,
    /// Node whose graph neighbourhood contributes related hits.
    #[serde(default)]
    pub related_to: Option<String>,
    /// Hops followed from `related_to`; `None` uses the configured default.
    #[serde(default)]
    pub relation_depth: Option<usize>,
}

impl HybridQuery {
    pub fn new(vector: Vec<f32>, limit: usize) -> Self {
        Self {
            vector,
            threshold: 0.0,
            limit,
            filters: SearchFilters::default(),
            related_to: None,
            relation_depth: None,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn related_to(mut self, node_id: impl Into<String>, depth: Option<usize>) -> Self {
        self.related_to = Some(node_id.into());
        self.relation_depth = depth;
        self
    }
}

/// An entity reached from the anchor, with the shortest node-id path to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntity {
    pub entity: Entity,
    /// Anchor first, this entity last.
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HybridResult {
    /// Vector hits, most similar first.
    pub direct: Vec<Entity>,
    /// Graph hits ordered by hop count, then relevance, then id.
    pub related: Vec<RelatedEntity>,
    /// Best relevance per entity id across both hit kinds.
    pub relevance: BTreeMap<String, f64>,
    pub truncated: bool,
}

impl HybridResult {
    /// Entity ids by relevance descending, then id.
    pub fn ranked_ids(&self) -> Vec<&str> {
        let mut ranked: Vec<(&str, f64)> = self
            .relevance
            .iter()
            .map(|(id, score)| (id.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().map(|(id, _)| id).collect()
    }

    pub fn paths(&self) -> Vec<&[String]> {
        self.related.iter().map(|r| r.path.as_slice()).collect()
    }
}

pub fn hybrid_search<S: IKnowledgeStore + IGraphStore + ?Sized>(
    store: &S,
    query: &HybridQuery,
    limits: &TraversalConfig,
    deadline: Deadline,
) -> LoreResult<HybridResult> {
    check_unit("threshold", query.threshold)?;
    if let Some(min) = query.filters.min_confidence {
        check_unit("min_confidence", min)?;
    }
    if query.filters.time_range.is_some() {
        return Err(LoreError::invalid(
            "hybrid search targets carry no time bounds to filter on",
        ));
    }
    let anchor = match query.related_to.as_deref() {
        Some(id) if id.trim().is_empty() => {
            return Err(LoreError::invalid("related_to must not be empty"))
        }
        other => other,
    };
    if query.vector.is_empty() && anchor.is_none() {
        return Err(LoreError::invalid(
            "hybrid search needs a query vector or a related_to node",
        ));
    }
    if query.limit == 0 {
        return Ok(HybridResult::default());
    }

    let direct = direct_hits(store, query, deadline)?;
    let mut relevance = BTreeMap::new();
    let n = direct.len() as f64;
    for (rank, entity) in direct.iter().enumerate() {
        let score = (1.0 - rank as f64 / n) * entity.confidence().unwrap_or_default();
        relevance.insert(entity.id(), score);
    }

    let mut related = Vec::new();
    let mut truncated = false;
    if let Some(anchor) = anchor {
        let depth = query.relation_depth.unwrap_or(limits.default_relation_depth);
        let (reached, capped) = reachable(store, anchor, depth, limits, deadline)?;
        truncated = capped;
        for path in reached {
            deadline.check(OPERATION)?;
            let Some(id) = path.last() else { continue };
            let entity = store.get(id)?;
            if !matches_filters(&entity, &query.filters) {
                continue;
            }
            let confidence = entity.confidence().unwrap_or_default();
            let score = (limits.related_base_score * confidence).max(
                limits.related_base_score - limits.path_length_penalty * path.len() as f64,
            );
            relevance
                .entry(entity.id())
                .and_modify(|best: &mut f64| *best = best.max(score))
                .or_insert(score);
            related.push(RelatedEntity { entity, path });
        }
        related.sort_by(|a, b| {
            let (ra, rb) = (relevance[&a.entity.id()], relevance[&b.entity.id()]);
            a.path
                .len()
                .cmp(&b.path.len())
                .then_with(|| rb.total_cmp(&ra))
                .then_with(|| a.entity.id().cmp(&b.entity.id()))
        });
    }

    debug!(
        direct = direct.len(),
        related = related.len(),
        truncated,
        "hybrid search complete"
    );
    Ok(HybridResult {
        direct,
        related,
        relevance,
        truncated,
    })
}

/// Items and synthesized entities above the threshold, merged by
/// similarity and cut to the limit.
fn direct_hits<S: IKnowledgeStore + ?Sized>(
    store: &S,
    query: &HybridQuery,
    deadline: Deadline,
) -> LoreResult<Vec<Entity>> {
    if query.vector.is_empty() {
        return Ok(Vec::new());
    }
    let mut candidates = Vec::new();
    for target in [SearchTarget::Items, SearchTarget::Synthesized] {
        deadline.check(OPERATION)?;
        let vector_query = VectorQuery::new(query.vector.clone(), Modality::Text, target)
            .threshold(query.threshold)
            .limit(query.limit)
            .filters(query.filters.clone());
        candidates.extend(store.vector_search(&vector_query)?);
    }
    candidates.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.entity.id().cmp(&b.entity.id()))
    });
    candidates.truncate(query.limit);
    Ok(candidates.into_iter().map(|c| c.entity).collect())
}

/// Breadth-first from `anchor` by node id. Each reached node comes with the
/// shortest path to it, anchor first; the anchor itself is excluded.
fn reachable<G: IGraphStore + ?Sized>(
    graph: &G,
    anchor: &str,
    max_depth: usize,
    limits: &TraversalConfig,
    deadline: Deadline,
) -> LoreResult<(Vec<Vec<String>>, bool)> {
    let mut truncated = false;
    let depth_limit = if max_depth > limits.depth_cap {
        warn!(
            requested = max_depth,
            cap = limits.depth_cap,
            "relation depth capped"
        );
        truncated = true;
        limits.depth_cap
    } else {
        max_depth
    };

    let mut parents: HashMap<String, String> = HashMap::new();
    let mut visited: HashSet<String> = HashSet::from([anchor.to_string()]);
    let mut frontier = vec![anchor.to_string()];
    let mut order = Vec::new();
    let mut explored = 0usize;

    'levels: for _ in 0..depth_limit {
        let mut next = Vec::new();
        for node in &frontier {
            deadline.check(OPERATION)?;
            let mut edges: Vec<_> = graph
                .edges_from(node)?
                .into_iter()
                .filter(|e| e.target_id != e.source_id)
                .collect();
            edges.sort_by(|a, b| {
                b.similarity
                    .total_cmp(&a.similarity)
                    .then_with(|| a.target_id.cmp(&b.target_id))
            });
            if edges.len() > limits.max_fanout {
                warn!(node_id = %node, cap = limits.max_fanout, "relation fan-out capped");
                edges.truncate(limits.max_fanout);
                truncated = true;
            }
            for edge in edges {
                explored += 1;
                if explored > limits.max_edges {
                    warn!(cap = limits.max_edges, "relation edge budget exhausted");
                    truncated = true;
                    break 'levels;
                }
                if visited.insert(edge.target_id.clone()) {
                    parents.insert(edge.target_id.clone(), node.clone());
                    order.push(edge.target_id.clone());
                    next.push(edge.target_id);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    let paths = order
        .into_iter()
        .map(|id| {
            let mut path = Vec::new();
            let mut current = Some(id);
            while let Some(node) = current {
                current = parents.get(&node).cloned();
                path.push(node);
            }
            path.reverse();
            path
        })
        .collect();
    Ok((paths, truncated))
}

fn matches_filters(entity: &Entity, filters: &SearchFilters) -> bool {
    if let Some(content_type) = filters.content_type {
        if entity.content_type() != Some(content_type) {
            return false;
        }
    }
    if let Some(min) = filters.min_confidence {
        if entity.confidence().map_or(true, |c| c < min) {
            return false;
        }
    }
    true
}
