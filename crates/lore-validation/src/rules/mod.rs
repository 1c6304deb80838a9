//! The rule battery. Each rule maps a finding to one [`RuleOutcome`].

pub mod consistency;
pub mod content;
pub mod linguistic;
pub mod multimodal;
pub mod source;
pub mod temporal;

use chrono::{DateTime, Utc};

use lore_core::config::ValidationConfig;
use lore_core::errors::LoreResult;
use lore_core::models::{RawFinding, RuleOutcome};

/// Run every enabled rule in priority order.
pub fn evaluate(
    finding: &RawFinding,
    config: &ValidationConfig,
    now: DateTime<Utc>,
) -> LoreResult<Vec<RuleOutcome>> {
    let mut outcomes = vec![
        content::check(finding, config.min_content_length),
        source::check(finding, config.source_reliability_floor),
    ];
    if config.temporal.enabled {
        outcomes.push(temporal::check(finding, config.temporal.max_age_days, now));
    }
    outcomes.push(consistency::check(finding, config.consistency_floor));
    outcomes.push(multimodal::check(
        finding,
        &config.weights,
        config.multimodal_floor,
    )?);
    outcomes.push(linguistic::check(finding));
    Ok(outcomes)
}

#[cfg(test)]
pub(crate) mod test_support {
    use lore_core::models::{ContentType, EmbeddingPair, RawFinding, SourceKind, SourceMetadata};

    pub fn finding_with_content(content: &str) -> RawFinding {
        RawFinding {
            id: "finding".into(),
            content: content.into(),
            content_type: ContentType::Research,
            evidence_score: 0.9,
            novelty_score: 0.9,
            embeddings: EmbeddingPair::default(),
            query: None,
            source: SourceMetadata {
                source_ref: "pubmed:1".into(),
                source_url: None,
                kind: SourceKind::Academic,
                authors: Vec::new(),
                published_at: None,
            },
            topics: Vec::new(),
            keywords: Vec::new(),
        }
    }

    pub fn finding_with_scores(evidence: f64, novelty: f64) -> RawFinding {
        RawFinding {
            evidence_score: evidence,
            novelty_score: novelty,
            ..finding_with_content("Some content.")
        }
    }
}
