//! Traversal over arbitrary graphs, cycles included, held in memory.

use std::collections::HashSet;

use chrono::Utc;
use proptest::prelude::*;

use lore_core::config::TraversalConfig;
use lore_core::models::{RelationType, Relationship};
use lore_core::Deadline;
use lore_graph::traversal::expand;
use lore_graph::ConceptGraph;

const CONCEPTS: [&str; 3] = ["alpha", "beta", "gamma"];

fn build(nodes: usize, edges: &[(usize, usize, f64)]) -> ConceptGraph {
    let mut graph = ConceptGraph::new();
    for i in 0..nodes {
        graph.ensure_node(&format!("n{i}"), CONCEPTS[i % CONCEPTS.len()]);
    }
    for &(s, t, similarity) in edges {
        let (s, t) = (s % nodes, t % nodes);
        if s == t {
            continue;
        }
        graph
            .add_relationship(Relationship {
                source_id: format!("n{s}"),
                target_id: format!("n{t}"),
                relation_type: RelationType::Related,
                similarity,
                created_at: Utc::now(),
            })
            .unwrap();
    }
    graph
}

proptest! {
    #[test]
    fn traversal_terminates_and_records_each_edge_once(
        nodes in 1usize..12,
        edges in prop::collection::vec((0usize..12, 0usize..12, 0.0f64..=1.0), 0..40),
        min_similarity in 0.0f64..=1.0,
        max_depth in 0usize..8,
    ) {
        let graph = build(nodes, &edges);
        let result = expand(
            &graph,
            "alpha",
            min_similarity,
            max_depth,
            &TraversalConfig::default(),
            Deadline::none(),
        ).unwrap();

        prop_assert!(result.paths.len() <= graph.edge_count());
        let mut pairs = HashSet::new();
        for path in &result.paths {
            prop_assert!(pairs.insert((path.source_id.clone(), path.target_id.clone())));
            prop_assert!(path.similarity >= min_similarity);
            prop_assert!(path.depth >= 1 && path.depth <= max_depth);
        }
        prop_assert!(result.max_depth_reached <= max_depth);
    }

    #[test]
    fn paths_are_ordered_by_depth_then_similarity(
        nodes in 2usize..10,
        edges in prop::collection::vec((0usize..10, 0usize..10, 0.0f64..=1.0), 0..30),
    ) {
        let graph = build(nodes, &edges);
        let result = expand(&graph, "alpha", 0.0, 6, &TraversalConfig::default(), Deadline::none())
            .unwrap();
        for pair in result.paths.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.depth < b.depth || (a.depth == b.depth && a.similarity >= b.similarity));
        }
    }
}
