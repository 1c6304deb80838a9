//! # lore-synthesis
//!
//! Accepted findings → content-type groups → sequential batches →
//! union-find clusters over pairwise text similarity → one merged
//! [`SynthesizedEntity`](lore_core::models::SynthesizedEntity) per cluster.
//!
//! Cluster count is not fixed in advance; a finding with no neighbour above
//! `min_confidence` becomes its own entity.
//!
//! Once persisted, entities are linked to each other and to stored
//! neighbours with `similar_to` edges (see [`relations`]).

pub mod clustering;
pub mod engine;
pub mod merge;
pub mod relations;

pub use engine::{persist, SynthesisEngine};
