use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::finding::RawFinding;

/// A validation rule in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ContentQuality,
    SourceReliability,
    InternalConsistency,
    MultimodalConsistency,
    LinguisticQuality,
    TemporalRelevance,
}

impl RuleKind {
    /// Hard gates force rejection when they fail.
    pub fn is_hard_gate(&self) -> bool {
        matches!(self, Self::ContentQuality | Self::SourceReliability)
    }

    /// Lower is more important; confidence weights each rule by `1 / priority`.
    pub fn priority(&self) -> u8 {
        match self {
            Self::ContentQuality => 1,
            Self::SourceReliability | Self::TemporalRelevance => 2,
            Self::InternalConsistency | Self::MultimodalConsistency => 3,
            Self::LinguisticQuality => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContentQuality => "content_quality",
            Self::SourceReliability => "source_reliability",
            Self::InternalConsistency => "internal_consistency",
            Self::MultimodalConsistency => "multimodal_consistency",
            Self::LinguisticQuality => "linguistic_quality",
            Self::TemporalRelevance => "temporal_relevance",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule's verdict on a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: RuleKind,
    pub score: f64,
    pub passed: bool,
    /// False when the rule had nothing to check (e.g. a single modality).
    pub applicable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RuleOutcome {
    pub fn hard_failed(&self) -> bool {
        self.rule.is_hard_gate() && !self.passed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    Reject,
}

/// The validator's verdict on one finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub finding_id: String,
    pub outcomes: Vec<RuleOutcome>,
    /// Mean of rule scores.
    pub aggregate_score: f64,
    /// Priority-weighted mean of rule scores.
    pub confidence: f64,
    pub decision: Decision,
    pub validated_at: DateTime<Utc>,
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        self.decision == Decision::Accept
    }

    pub fn outcome(&self, rule: RuleKind) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule == rule)
    }

    pub fn hard_failures(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.hard_failed())
    }
}

/// A finding paired with its validation result; the synthesizer's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedFinding {
    pub finding: RawFinding,
    pub result: ValidationResult,
}

impl ValidatedFinding {
    pub fn new(finding: RawFinding, result: ValidationResult) -> Self {
        Self { finding, result }
    }
}
