//! ValidationEngine: implements IValidator over the rule battery.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use lore_core::config::{check_unit, ValidationConfig};
use lore_core::errors::{LoreError, LoreResult};
use lore_core::models::{RawFinding, ValidatedFinding, ValidationResult};
use lore_core::traits::IValidator;
use lore_core::Deadline;

use crate::aggregate::{aggregate_score, decide, weighted_confidence};
use crate::rules;

const OPERATION: &str = "validation.validate";

/// Stateless; safe to share across threads and run concurrently.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate against an explicit clock (the temporal rule reads `now`).
    pub fn validate_at(
        &self,
        finding: &RawFinding,
        now: DateTime<Utc>,
    ) -> LoreResult<ValidationResult> {
        check_finding(finding)?;
        let outcomes = rules::evaluate(finding, &self.config, now)?;
        let aggregate = aggregate_score(&outcomes);
        let confidence = weighted_confidence(&outcomes);
        let decision = decide(&outcomes, aggregate, self.config.min_overall_score);

        debug!(
            finding_id = %finding.id,
            aggregate,
            confidence,
            ?decision,
            hard_failures = outcomes.iter().filter(|o| o.hard_failed()).count(),
            "finding validated"
        );

        Ok(ValidationResult {
            finding_id: finding.id.clone(),
            outcomes,
            aggregate_score: aggregate,
            confidence,
            decision,
            validated_at: now,
        })
    }

    /// Validate many findings in parallel. Results keep input order; the
    /// first error fails the whole batch.
    pub fn validate_batch(
        &self,
        findings: &[RawFinding],
        deadline: Deadline,
    ) -> LoreResult<Vec<ValidationResult>> {
        let _span = info_span!("lore.validation", findings = findings.len()).entered();
        deadline.check(OPERATION)?;
        let now = Utc::now();
        let results = findings
            .par_iter()
            .map(|f| {
                deadline.check(OPERATION)?;
                self.validate_at(f, now)
            })
            .collect::<LoreResult<Vec<_>>>()?;

        let accepted = results.iter().filter(|r| r.is_accepted()).count();
        info!(
            findings = findings.len(),
            accepted,
            rejected = findings.len() - accepted,
            "validation batch complete"
        );
        Ok(results)
    }

    /// [`validate_batch`](Self::validate_batch), pairing each finding with its result.
    pub fn validate_findings(
        &self,
        findings: Vec<RawFinding>,
        deadline: Deadline,
    ) -> LoreResult<Vec<ValidatedFinding>> {
        let results = self.validate_batch(&findings, deadline)?;
        Ok(findings
            .into_iter()
            .zip(results)
            .map(|(finding, result)| ValidatedFinding::new(finding, result))
            .collect())
    }
}

impl IValidator for ValidationEngine {
    fn validate(&self, finding: &RawFinding, deadline: Deadline) -> LoreResult<ValidationResult> {
        let _span = info_span!("lore.validation", finding_id = %finding.id).entered();
        deadline.check(OPERATION)?;
        self.validate_at(finding, Utc::now())
    }
}

fn check_finding(finding: &RawFinding) -> LoreResult<()> {
    if finding.id.trim().is_empty() {
        return Err(LoreError::invalid("finding id must not be empty"));
    }
    check_unit("evidence_score", finding.evidence_score)?;
    check_unit("novelty_score", finding.novelty_score)?;
    Ok(())
}
