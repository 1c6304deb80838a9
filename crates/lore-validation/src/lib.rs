//! # lore-validation
//!
//! Quality gate between retrieval and synthesis.
//!
//! ## Rules
//! 1. **Content quality** — minimum length (hard gate)
//! 2. **Source reliability** — evidence score floor (hard gate)
//! 3. **Internal consistency** — evidence and novelty not both weak
//! 4. **Multimodal consistency** — fused similarity to the query
//! 5. **Linguistic quality** — decodable, word-bearing prose
//! 6. **Temporal relevance** — source age, disabled unless configured
//!
//! A finding is accepted when the mean rule score reaches
//! `min_overall_score` and no hard gate failed.

pub mod aggregate;
pub mod engine;
pub mod rules;

pub use engine::ValidationEngine;
