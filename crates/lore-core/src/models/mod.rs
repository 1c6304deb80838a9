mod citation;
mod content_type;
mod entity;
mod extension;
mod finding;
mod fragment;
mod frame;
mod knowledge_item;
mod relationship;
mod search;
mod synthesized;
mod validation_result;

pub use citation::{Citation, Locator};
pub use content_type::ContentType;
pub use entity::{Entity, EntityKind};
pub use extension::{ExtensionMap, ExtensionValue};
pub use finding::{EmbeddingPair, RawFinding, SourceKind, SourceMetadata};
pub use fragment::KnowledgeFragment;
pub use frame::{BoundingBox, DetectedObject, VideoFrame};
pub use knowledge_item::{KnowledgeItem, Resolution, VideoDetails, VideoMetadata};
pub use relationship::{RelationType, Relationship};
pub use search::{
    Modality, SearchCandidate, SearchFilters, SearchTarget, TimeRange, VectorQuery,
};
pub use synthesized::SynthesizedEntity;
pub use validation_result::{
    Decision, RuleKind, RuleOutcome, ValidatedFinding, ValidationResult,
};
