pub mod cycles;
pub mod indexed_graph;

pub use indexed_graph::{ConceptGraph, ConceptNode};
