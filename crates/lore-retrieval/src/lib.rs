//! # lore-retrieval
//!
//! The multimodal ranker. Two stages: text-similarity candidate gathering
//! through the knowledge store, then composite scoring that fuses visual
//! similarity and structural bonuses.
//!
//! ```text
//! RetrievalEngine
//! ├── candidate gathering   (IKnowledgeStore::vector_search, text → fragments)
//! ├── visual similarity     (frames + fragment visual embeddings, max)
//! └── RankingPipeline
//!     ├── Scorer            (weighted composite + scene-change bonus)
//!     └── ordering          (composite, text similarity, created_at, id)
//! ```

pub mod engine;
pub mod ranking;
pub mod request;
pub mod visual;

pub use engine::RetrievalEngine;
pub use ranking::{RankedFragment, RankingPipeline};
pub use request::SearchRequest;
