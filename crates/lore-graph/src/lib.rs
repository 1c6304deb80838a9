//! # lore-graph
//!
//! Relationship traversal over the concept graph. Expansion is an explicit
//! visited-set BFS so termination never depends on the backing store's
//! own cycle handling.
//!
//! Path search and hybrid search walk the same edges by node id, so
//! synthesized entities take part alongside knowledge items.

pub mod discovery;
pub mod engine;
pub mod graph;
pub mod hybrid;
pub mod paths;
pub mod traversal;

pub use discovery::DiscoveryOptions;
pub use engine::TraversalEngine;
pub use graph::ConceptGraph;
pub use hybrid::{HybridQuery, HybridResult, RelatedEntity};
pub use paths::{PathSearchResult, RelationPath};
pub use traversal::{ConceptPath, TraversalResult};
