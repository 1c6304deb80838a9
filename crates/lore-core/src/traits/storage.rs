use crate::errors::LoreResult;
use crate::models::{Entity, Relationship, SearchCandidate, VectorQuery, VideoFrame};

/// Entity persistence and the vector-similarity index.
///
/// Writes are durable before the call returns. Embedding dimensions are
/// validated on every write and every query.
pub trait IKnowledgeStore: Send + Sync {
    /// Insert or version an entity, returning its id.
    fn upsert(&self, entity: &Entity) -> LoreResult<String>;

    /// Latest version of an entity, or `NotFound`.
    fn get(&self, id: &str) -> LoreResult<Entity>;

    /// Candidates with similarity strictly above `query.threshold`, best first.
    /// An empty result is not an error.
    fn vector_search(&self, query: &VectorQuery) -> LoreResult<Vec<SearchCandidate>>;

    /// Frames belonging to a fragment, by timestamp.
    fn frames_for_fragment(&self, fragment_id: &str) -> LoreResult<Vec<VideoFrame>>;
}

/// Adjacency over the relationship graph, sharing the knowledge store's ids.
pub trait IGraphStore: Send + Sync {
    /// Outgoing edges of a node (item or synthesized entity), strongest first.
    fn edges_from(&self, node_id: &str) -> LoreResult<Vec<Relationship>>;

    /// Ids of items whose concept label equals `concept`, sorted.
    fn items_with_concept(&self, concept: &str) -> LoreResult<Vec<String>>;

    /// Concept label of a node, or `NotFound`.
    fn node_concept(&self, node_id: &str) -> LoreResult<String>;
}
