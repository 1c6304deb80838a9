#![allow(dead_code)]

use lore_core::models::*;

/// Well-formed prose of exactly `len` characters.
pub fn prose(len: usize) -> String {
    let sentence = "Omega-3 fatty acids support cardiovascular health. ";
    let mut text: String = sentence.repeat(len / sentence.len() + 1);
    text.truncate(len);
    let trimmed = text.trim_end().len();
    if trimmed < len {
        text.truncate(trimmed);
        text.push_str(&"x".repeat(len - trimmed));
    }
    text
}

pub fn finding(id: &str, evidence: f64, novelty: f64, content_len: usize) -> RawFinding {
    RawFinding {
        id: id.into(),
        content: prose(content_len),
        content_type: ContentType::Research,
        evidence_score: evidence,
        novelty_score: novelty,
        embeddings: EmbeddingPair::text(vec![1.0, 0.0, 0.0]),
        query: None,
        source: SourceMetadata {
            source_ref: format!("pubmed:{id}"),
            source_url: Some(format!("https://example.org/{id}")),
            kind: SourceKind::Academic,
            authors: vec!["A. Researcher".into()],
            published_at: None,
        },
        topics: vec!["omega-3".into()],
        keywords: vec!["fish oil".into()],
    }
}
