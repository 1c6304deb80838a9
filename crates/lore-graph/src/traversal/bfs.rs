//! Level-by-level expansion with a visited set.
//!
//! Every item is expanded at most once, at the lowest depth it is reached.
//! Each `(source, target)` edge is recorded at most once, so cycles in the
//! stored graph cannot inflate the result.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use lore_core::config::{check_unit, TraversalConfig};
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::Relationship;
use lore_core::traits::IGraphStore;
use lore_core::Deadline;

use super::{ConceptPath, TraversalResult};
use crate::graph::{cycles, ConceptGraph};

const OPERATION: &str = "traversal.related_concepts";

/// Expand from every item labelled `start_concept` along edges with
/// similarity at or above `min_similarity`, up to `max_depth` levels.
pub fn expand<G: IGraphStore + ?Sized>(
    graph: &G,
    start_concept: &str,
    min_similarity: f64,
    max_depth: usize,
    limits: &TraversalConfig,
    deadline: Deadline,
) -> LoreResult<TraversalResult> {
    check_unit("min_similarity", min_similarity)?;
    if start_concept.trim().is_empty() {
        return Err(LoreError::invalid("start concept must not be empty"));
    }
    if max_depth == 0 {
        return Ok(TraversalResult::empty(start_concept));
    }

    let mut truncated = false;
    let depth_limit = if max_depth > limits.depth_cap {
        warn!(
            requested = max_depth,
            cap = limits.depth_cap,
            "traversal depth capped"
        );
        truncated = true;
        limits.depth_cap
    } else {
        max_depth
    };

    deadline.check(OPERATION)?;
    let starts = graph.items_with_concept(start_concept)?;
    let mut concepts: HashMap<String, String> = starts
        .iter()
        .map(|id| (id.clone(), start_concept.to_string()))
        .collect();
    let mut visited: HashSet<String> = starts.iter().cloned().collect();
    let mut recorded: HashSet<(String, String)> = HashSet::new();
    let mut frontier = starts;
    let mut paths = Vec::new();
    let mut max_depth_reached = 0;

    'levels: for depth in 1..=depth_limit {
        if frontier.is_empty() {
            break;
        }
        let mut next = Vec::new();

        for node in &frontier {
            deadline.check(OPERATION)?;
            let mut edges: Vec<Relationship> = graph
                .edges_from(node)?
                .into_iter()
                .filter(|e| e.similarity >= min_similarity && e.target_id != e.source_id)
                .collect();
            edges.sort_by(|a, b| {
                b.similarity
                    .total_cmp(&a.similarity)
                    .then_with(|| a.target_id.cmp(&b.target_id))
            });
            if edges.len() > limits.max_fanout {
                warn!(
                    item_id = %node,
                    edges = edges.len(),
                    cap = limits.max_fanout,
                    "traversal fan-out capped"
                );
                edges.truncate(limits.max_fanout);
                truncated = true;
            }

            for edge in edges {
                if !recorded.insert((edge.source_id.clone(), edge.target_id.clone())) {
                    continue;
                }
                if paths.len() >= limits.max_edges {
                    warn!(cap = limits.max_edges, "traversal edge budget exhausted");
                    truncated = true;
                    break 'levels;
                }

                let source_concept = concept_of(graph, &mut concepts, &edge.source_id)?;
                let target_concept = concept_of(graph, &mut concepts, &edge.target_id)?;
                if visited.insert(edge.target_id.clone()) {
                    next.push(edge.target_id.clone());
                }
                max_depth_reached = depth;
                paths.push(ConceptPath {
                    source_id: edge.source_id,
                    source_concept,
                    target_id: edge.target_id,
                    target_concept,
                    relation_type: edge.relation_type,
                    similarity: edge.similarity,
                    depth,
                });
            }
        }

        frontier = next;
    }

    paths.sort_by(|a, b| {
        a.depth
            .cmp(&b.depth)
            .then_with(|| b.similarity.total_cmp(&a.similarity))
            .then_with(|| a.source_id.cmp(&b.source_id))
            .then_with(|| a.target_id.cmp(&b.target_id))
    });

    let cyclic_components = cycles::cyclic_components(&snapshot(&paths));
    debug!(
        start_concept,
        edges = paths.len(),
        visited = visited.len(),
        max_depth_reached,
        truncated,
        "traversal complete"
    );

    Ok(TraversalResult {
        start_concept: start_concept.to_string(),
        paths,
        max_depth_reached,
        truncated,
        cyclic_components,
    })
}

fn concept_of<G: IGraphStore + ?Sized>(
    graph: &G,
    cache: &mut HashMap<String, String>,
    item_id: &str,
) -> LoreResult<String> {
    if let Some(concept) = cache.get(item_id) {
        return Ok(concept.clone());
    }
    let concept = graph.node_concept(item_id)?;
    cache.insert(item_id.to_string(), concept.clone());
    Ok(concept)
}

/// Graph of just the traversed edges.
fn snapshot(paths: &[ConceptPath]) -> ConceptGraph {
    let mut graph = ConceptGraph::new();
    for path in paths {
        let source = graph.ensure_node(&path.source_id, &path.source_concept);
        let target = graph.ensure_node(&path.target_id, &path.target_concept);
        graph.graph.update_edge(
            source,
            target,
            Relationship {
                source_id: path.source_id.clone(),
                target_id: path.target_id.clone(),
                relation_type: path.relation_type,
                similarity: path.similarity,
                created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
            },
        );
    }
    graph
}
