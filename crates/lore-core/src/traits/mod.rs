mod embedding;
mod storage;
mod synthesizer;
mod validator;

pub use embedding::IEmbeddingProvider;
pub use storage::{IGraphStore, IKnowledgeStore};
pub use synthesizer::ISynthesizer;
pub use validator::IValidator;
