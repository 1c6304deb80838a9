//! Simple-path search between two graph nodes.
//!
//! Depth-first over outgoing edges with an on-path set, so no path visits a
//! node twice and cycles cannot keep the search alive. The same fan-out,
//! depth and edge caps as concept traversal apply, plus a cap on paths
//! returned.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lore_core::config::TraversalConfig;
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::Relationship;
use lore_core::traits::IGraphStore;
use lore_core::Deadline;

const OPERATION: &str = "traversal.paths_between";

/// One start-to-end chain of edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationPath {
    pub edges: Vec<Relationship>,
}

impl RelationPath {
    /// Node ids from start to end.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            nodes.push(first.source_id.as_str());
        }
        nodes.extend(self.edges.iter().map(|e| e.target_id.as_str()));
        nodes
    }

    /// Hop count.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Product of edge similarities.
    pub fn strength(&self) -> f64 {
        self.edges.iter().map(|e| e.similarity).product()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSearchResult {
    pub start_id: String,
    pub end_id: String,
    /// Shortest first, then strongest, then by node ids.
    pub paths: Vec<RelationPath>,
    /// A fan-out, depth, edge or path cap cut the search short.
    pub truncated: bool,
}

impl PathSearchResult {
    fn empty(start_id: &str, end_id: &str) -> Self {
        Self {
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
            ..Self::default()
        }
    }

    pub fn shortest(&self) -> Option<&RelationPath> {
        self.paths.first()
    }
}

/// Every simple path from `start_id` to `end_id` of at most `max_depth`
/// edges, subject to the limits in `limits`.
pub fn paths_between<G: IGraphStore + ?Sized>(
    graph: &G,
    start_id: &str,
    end_id: &str,
    max_depth: usize,
    limits: &TraversalConfig,
    deadline: Deadline,
) -> LoreResult<PathSearchResult> {
    if start_id.trim().is_empty() || end_id.trim().is_empty() {
        return Err(LoreError::invalid("path endpoints must not be empty"));
    }
    if max_depth == 0 || start_id == end_id {
        return Ok(PathSearchResult::empty(start_id, end_id));
    }

    let mut truncated = false;
    let depth_limit = if max_depth > limits.depth_cap {
        warn!(
            requested = max_depth,
            cap = limits.depth_cap,
            "path search depth capped"
        );
        truncated = true;
        limits.depth_cap
    } else {
        max_depth
    };

    deadline.check(OPERATION)?;
    let mut adjacency = Adjacency::new(limits.max_fanout);
    let mut on_path: HashSet<String> = HashSet::from([start_id.to_string()]);
    let mut path: Vec<Relationship> = Vec::new();
    // One frame per node on the current path: its edges and the next to try.
    let mut stack: Vec<(Vec<Relationship>, usize)> = vec![(adjacency.edges(graph, start_id)?, 0)];
    let mut explored = 0usize;
    let mut paths = Vec::new();

    'search: loop {
        let step = match stack.last_mut() {
            None => break,
            Some((edges, next)) if *next < edges.len() => {
                *next += 1;
                Some(edges[*next - 1].clone())
            }
            Some(_) => None,
        };
        let Some(edge) = step else {
            stack.pop();
            if let Some(done) = path.pop() {
                on_path.remove(&done.target_id);
            }
            continue;
        };

        deadline.check(OPERATION)?;
        explored += 1;
        if explored > limits.max_edges {
            warn!(cap = limits.max_edges, "path search edge budget exhausted");
            truncated = true;
            break;
        }
        if on_path.contains(&edge.target_id) {
            continue;
        }

        if edge.target_id == end_id {
            let mut edges = path.clone();
            edges.push(edge);
            paths.push(RelationPath { edges });
            if paths.len() >= limits.max_paths {
                warn!(cap = limits.max_paths, "path search path budget exhausted");
                truncated = true;
                break 'search;
            }
            continue;
        }
        if path.len() + 1 >= depth_limit {
            continue;
        }

        let next_edges = adjacency.edges(graph, &edge.target_id)?;
        on_path.insert(edge.target_id.clone());
        path.push(edge);
        stack.push((next_edges, 0));
    }
    truncated |= adjacency.truncated;

    paths.sort_by(|a, b| {
        a.len()
            .cmp(&b.len())
            .then_with(|| b.strength().total_cmp(&a.strength()))
            .then_with(|| a.nodes().cmp(&b.nodes()))
    });
    debug!(
        start_id,
        end_id,
        paths = paths.len(),
        explored,
        truncated,
        "path search complete"
    );

    Ok(PathSearchResult {
        start_id: start_id.to_string(),
        end_id: end_id.to_string(),
        paths,
        truncated,
    })
}

/// Outgoing edges per node, fetched once and capped to the strongest
/// `max_fanout`.
struct Adjacency {
    max_fanout: usize,
    cache: HashMap<String, Vec<Relationship>>,
    truncated: bool,
}

impl Adjacency {
    fn new(max_fanout: usize) -> Self {
        Self {
            max_fanout,
            cache: HashMap::new(),
            truncated: false,
        }
    }

    fn edges<G: IGraphStore + ?Sized>(
        &mut self,
        graph: &G,
        node_id: &str,
    ) -> LoreResult<Vec<Relationship>> {
        if let Some(edges) = self.cache.get(node_id) {
            return Ok(edges.clone());
        }
        let mut edges: Vec<Relationship> = graph
            .edges_from(node_id)?
            .into_iter()
            .filter(|e| e.target_id != e.source_id)
            .collect();
        edges.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.target_id.cmp(&b.target_id))
        });
        if edges.len() > self.max_fanout {
            warn!(
                node_id,
                edges = edges.len(),
                cap = self.max_fanout,
                "path search fan-out capped"
            );
            edges.truncate(self.max_fanout);
            self.truncated = true;
        }
        self.cache.insert(node_id.to_string(), edges.clone());
        Ok(edges)
    }
}
