//! # lore-core
//!
//! Foundation crate for the lore knowledge engine.
//! Defines the data model, error taxonomy, configuration, deadlines and the
//! storage/validation/synthesis seams every other crate builds on.

pub mod config;
pub mod constants;
pub mod deadline;
pub mod errors;
pub mod models;
pub mod similarity;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::LoreConfig;
pub use deadline::Deadline;
pub use errors::{LoreError, LoreResult};
pub use models::{
    Citation, ContentType, Entity, EntityKind, KnowledgeFragment, KnowledgeItem, Relationship,
    RelationType, SynthesizedEntity, VideoFrame,
};
