//! Strongly connected components over traversed edges.

use petgraph::algo::tarjan_scc;

use super::indexed_graph::ConceptGraph;

/// Groups of item ids that reach each other, each sorted, largest group first.
/// Singletons are omitted: self-loops cannot be stored, so a singleton is acyclic.
pub fn cyclic_components(graph: &ConceptGraph) -> Vec<Vec<String>> {
    let mut components: Vec<Vec<String>> = tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut ids: Vec<String> = scc
                .into_iter()
                .filter_map(|idx| graph.graph.node_weight(idx))
                .map(|n| n.item_id.clone())
                .collect();
            ids.sort();
            ids
        })
        .collect();
    components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    components
}
