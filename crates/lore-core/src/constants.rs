/// Lore version string.
pub const LORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Hard ceiling on traversal depth, applied regardless of configuration.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Hard ceiling on synthesis batch size, applied regardless of configuration.
pub const MAX_SYNTHESIS_BATCH: usize = 10_000;

/// Minimum number of whitespace-separated words for well-formed prose.
pub const MIN_WORDS_FOR_PROSE: usize = 3;

/// Prefix of deterministic synthesized-entity ids.
pub const SYNTHESIZED_ID_PREFIX: &str = "syn-";

/// Separator used to derive relationship ids from their endpoints.
pub const RELATIONSHIP_ID_SEPARATOR: &str = "->";
