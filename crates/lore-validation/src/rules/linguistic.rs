//! Basic well-formedness of prose.

use std::sync::LazyLock;

use regex::Regex;

use lore_core::constants::MIN_WORDS_FOR_PROSE;
use lore_core::models::{RawFinding, RuleKind, RuleOutcome};

/// Sentence terminators followed by whitespace or end of text.
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(\s|$)").unwrap());

/// 0 for empty, undecodable or word-poor content; 0.8 for a single sentence.
pub fn check(finding: &RawFinding) -> RuleOutcome {
    let (score, detail) = score(&finding.content);
    RuleOutcome {
        rule: RuleKind::LinguisticQuality,
        score,
        passed: score > 0.0,
        applicable: true,
        detail,
    }
}

fn score(content: &str) -> (f64, Option<String>) {
    let text = content.trim();
    if text.is_empty() {
        return (0.0, Some("empty content".into()));
    }
    if text.contains(char::REPLACEMENT_CHARACTER) {
        return (0.0, Some("undecodable content".into()));
    }
    if text
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
    {
        return (0.0, Some("control characters in content".into()));
    }
    let words = text.split_whitespace().count();
    if words < MIN_WORDS_FOR_PROSE {
        return (0.0, Some(format!("{words} words")));
    }
    let sentences = SENTENCE_END.find_iter(text).count().max(1);
    if sentences == 1 {
        (0.8, None)
    } else {
        (1.0, None)
    }
}
