// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "lore.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_TEXT_DIMENSIONS: usize = 384;
pub const DEFAULT_VISUAL_DIMENSIONS: usize = 512;

// --- Retrieval ---
pub const DEFAULT_TEXT_WEIGHT: f64 = 0.6;
pub const DEFAULT_VISUAL_WEIGHT: f64 = 0.4;
pub const DEFAULT_SCENE_CHANGE_WEIGHT: f64 = 0.2;
pub const DEFAULT_SEARCH_THRESHOLD: f64 = 0.5;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

// --- Traversal ---
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.7;
pub const DEFAULT_MAX_DEPTH: usize = 5;
pub const DEFAULT_DEPTH_CAP: usize = 32;
pub const DEFAULT_MAX_FANOUT: usize = 64;
pub const DEFAULT_MAX_EDGES: usize = 10_000;
pub const DEFAULT_MAX_PATHS: usize = 100;
pub const DEFAULT_RELATION_DEPTH: usize = 2;
pub const DEFAULT_RELATED_BASE_SCORE: f64 = 0.7;
pub const DEFAULT_PATH_LENGTH_PENALTY: f64 = 0.1;

// --- Validation ---
pub const DEFAULT_MIN_OVERALL_SCORE: f64 = 0.7;
pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 50;
pub const DEFAULT_SOURCE_RELIABILITY_FLOOR: f64 = 0.5;
pub const DEFAULT_CONSISTENCY_FLOOR: f64 = 0.3;
pub const DEFAULT_MULTIMODAL_FLOOR: f64 = 0.5;
pub const DEFAULT_TEMPORAL_RULE_ENABLED: bool = false;
pub const DEFAULT_MAX_AGE_DAYS: u32 = 365;

// --- Synthesis ---
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_SYNTHESIS_BATCH_SIZE: usize = 100;
pub const DEFAULT_LINK_RELATIONS: bool = true;
pub const DEFAULT_NEIGHBOUR_SEARCH_FLOOR: f64 = 0.5;

// --- Runtime ---
pub const DEFAULT_MAX_CONCURRENT_VALIDATIONS: usize = 10;
pub const DEFAULT_MAX_CONCURRENT_SYNTHESIS: usize = 5;
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
