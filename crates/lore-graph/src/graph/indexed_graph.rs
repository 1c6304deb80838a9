//! petgraph::StableGraph of items and their relationships.
//!
//! Serves as an in-memory `IGraphStore` and as the snapshot used for cycle
//! analysis of a traversal.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Directed;

use lore_core::config::check_unit;
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::Relationship;
use lore_core::traits::IGraphStore;

/// A node in the concept graph, representing an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptNode {
    pub item_id: String,
    pub concept: String,
}

pub type ConceptStableGraph = StableGraph<ConceptNode, Relationship, Directed>;

/// Item graph with O(1) lookup by item id.
#[derive(Debug, Clone, Default)]
pub struct ConceptGraph {
    pub graph: ConceptStableGraph,
    pub node_index: HashMap<String, NodeIndex>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for an item. An existing node keeps its label.
    pub fn ensure_node(&mut self, item_id: &str, concept: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(item_id) {
            return idx;
        }
        let idx = self.graph.add_node(ConceptNode {
            item_id: item_id.to_string(),
            concept: concept.to_string(),
        });
        self.node_index.insert(item_id.to_string(), idx);
        idx
    }

    pub fn get_node(&self, item_id: &str) -> Option<NodeIndex> {
        self.node_index.get(item_id).copied()
    }

    /// Add or replace the edge for `(source, target)`. Both endpoints must
    /// exist; self-loops are rejected.
    pub fn add_relationship(&mut self, rel: Relationship) -> LoreResult<()> {
        if rel.source_id == rel.target_id {
            return Err(LoreError::invalid(format!(
                "self-loop on {} rejected",
                rel.source_id
            )));
        }
        check_unit("similarity", rel.similarity)?;
        let source = self
            .get_node(&rel.source_id)
            .ok_or_else(|| LoreError::not_found(rel.source_id.clone()))?;
        let target = self
            .get_node(&rel.target_id)
            .ok_or_else(|| LoreError::not_found(rel.target_id.clone()))?;
        self.graph.update_edge(source, target, rel);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl IGraphStore for ConceptGraph {
    fn edges_from(&self, item_id: &str) -> LoreResult<Vec<Relationship>> {
        let Some(idx) = self.get_node(item_id) else {
            return Ok(Vec::new());
        };
        let mut edges: Vec<Relationship> = self
            .graph
            .edges(idx)
            .map(|edge| edge.weight().clone())
            .collect();
        edges.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.target_id.cmp(&b.target_id))
        });
        Ok(edges)
    }

    fn items_with_concept(&self, concept: &str) -> LoreResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .graph
            .node_weights()
            .filter(|n| n.concept == concept)
            .map(|n| n.item_id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    fn node_concept(&self, item_id: &str) -> LoreResult<String> {
        self.get_node(item_id)
            .and_then(|idx| self.graph.node_weight(idx))
            .map(|n| n.concept.clone())
            .ok_or_else(|| LoreError::not_found(item_id))
    }
}
