//! Simple-path search between stored nodes.

mod common;

use std::time::{Duration, Instant};

use lore_core::errors::LoreError;
use lore_core::Deadline;
use lore_graph::TraversalEngine;

use common::*;

/// a → b → d, a → c → d, a → d, plus d → a closing a cycle.
fn diamond_store() -> std::sync::Arc<lore_storage::StorageEngine> {
    let store = store();
    for id in ["a", "b", "c", "d"] {
        put_item(&store, id, id);
    }
    put_edge(&store, "a", "b", 0.9);
    put_edge(&store, "b", "d", 0.9);
    put_edge(&store, "a", "c", 0.8);
    put_edge(&store, "c", "d", 0.8);
    put_edge(&store, "a", "d", 0.5);
    put_edge(&store, "d", "a", 0.9);
    store
}

#[test]
fn all_simple_paths_shortest_then_strongest() {
    let store = diamond_store();
    let result = traversal(&store)
        .paths_between("a", "d", 3, Deadline::none())
        .unwrap();

    let nodes: Vec<Vec<&str>> = result.paths.iter().map(|p| p.nodes()).collect();
    assert_eq!(
        nodes,
        vec![vec!["a", "d"], vec!["a", "b", "d"], vec!["a", "c", "d"]]
    );
    assert!((result.paths[1].strength() - 0.81).abs() < 1e-9);
    assert!(!result.truncated);
    assert_eq!(result.shortest().unwrap().len(), 1);
}

#[test]
fn depth_bounds_path_length() {
    let store = diamond_store();
    let result = traversal(&store)
        .paths_between("a", "d", 1, Deadline::none())
        .unwrap();
    assert_eq!(result.paths.len(), 1);
    assert_eq!(result.paths[0].nodes(), vec!["a", "d"]);
}

#[test]
fn cycles_never_repeat_a_node() {
    let store = diamond_store();
    let result = traversal(&store)
        .paths_between("b", "a", 10, Deadline::none())
        .unwrap();
    assert_eq!(result.paths.len(), 1);
    assert_eq!(result.paths[0].nodes(), vec!["b", "d", "a"]);
}

#[test]
fn unreachable_or_trivial_endpoints_give_no_paths() {
    let store = diamond_store();
    let engine = traversal(&store);
    assert!(engine.paths_between("d", "b", 1, Deadline::none()).unwrap().paths.is_empty());
    assert!(engine.paths_between("a", "a", 3, Deadline::none()).unwrap().paths.is_empty());
    assert!(engine.paths_between("a", "d", 0, Deadline::none()).unwrap().paths.is_empty());
}

#[test]
fn empty_endpoint_is_rejected() {
    let store = diamond_store();
    let err = traversal(&store)
        .paths_between("", "d", 3, Deadline::none())
        .unwrap_err();
    assert!(matches!(err, LoreError::InvalidArgument { .. }));
}

#[test]
fn path_budget_truncates() {
    let store = diamond_store();
    let mut config = config().traversal;
    config.max_paths = 2;
    let engine = TraversalEngine::new(store, config);

    let result = engine.paths_between("a", "d", 3, Deadline::none()).unwrap();
    assert_eq!(result.paths.len(), 2);
    assert!(result.truncated);
}

#[test]
fn paths_run_through_synthesized_entities() {
    let store = store();
    put_item(&store, "item-a", "A");
    put_synthesized(&store, "syn-1", "omega-3");
    put_item(&store, "item-b", "B");
    put_edge(&store, "item-a", "syn-1", 0.9);
    put_edge(&store, "syn-1", "item-b", 0.9);

    let result = traversal(&store)
        .paths_between("item-a", "item-b", 2, Deadline::none())
        .unwrap();
    assert_eq!(result.paths.len(), 1);
    assert_eq!(result.paths[0].nodes(), vec!["item-a", "syn-1", "item-b"]);
}

#[test]
fn expired_deadline_times_out() {
    let store = diamond_store();
    let err = traversal(&store)
        .paths_between("a", "d", 3, Deadline::at(Instant::now() - Duration::from_millis(1)))
        .unwrap_err();
    assert!(matches!(err, LoreError::Timeout { .. }));
}
