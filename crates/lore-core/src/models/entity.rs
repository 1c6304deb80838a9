use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    Citation, ContentType, KnowledgeFragment, KnowledgeItem, Relationship, SynthesizedEntity, VideoFrame,
};
use crate::errors::{LoreError, LoreResult};

/// Every persisted kind, sharing one id space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Entity {
    Item(KnowledgeItem),
    Fragment(KnowledgeFragment),
    Frame(VideoFrame),
    Citation(Citation),
    Relationship(Relationship),
    Synthesized(SynthesizedEntity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Item,
    Fragment,
    Frame,
    Citation,
    Relationship,
    Synthesized,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Fragment => "fragment",
            Self::Frame => "frame",
            Self::Citation => "citation",
            Self::Relationship => "relationship",
            Self::Synthesized => "synthesized",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Entity {
    pub fn id(&self) -> String {
        match self {
            Self::Item(i) => i.id.clone(),
            Self::Fragment(f) => f.id.clone(),
            Self::Frame(f) => f.id.clone(),
            Self::Citation(c) => c.id.clone(),
            Self::Relationship(r) => r.id(),
            Self::Synthesized(s) => s.id.clone(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Item(_) => EntityKind::Item,
            Self::Fragment(_) => EntityKind::Fragment,
            Self::Frame(_) => EntityKind::Frame,
            Self::Citation(_) => EntityKind::Citation,
            Self::Relationship(_) => EntityKind::Relationship,
            Self::Synthesized(_) => EntityKind::Synthesized,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Item(i) => i.created_at,
            Self::Fragment(f) => f.created_at,
            Self::Frame(f) => f.created_at,
            Self::Citation(c) => c.accessed_at,
            Self::Relationship(r) => r.created_at,
            Self::Synthesized(s) => s.created_at,
        }
    }

    /// Confidence carried by knowledge-bearing kinds: an item's evidence
    /// score, a fragment's or synthesized entity's confidence.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Item(i) => Some(i.evidence_score),
            Self::Fragment(f) => Some(f.confidence),
            Self::Synthesized(s) => Some(s.confidence),
            Self::Frame(_) | Self::Citation(_) | Self::Relationship(_) => None,
        }
    }

    pub fn content_type(&self) -> Option<ContentType> {
        match self {
            Self::Item(i) => Some(i.content_type),
            Self::Fragment(f) => Some(f.content_type),
            Self::Synthesized(s) => Some(s.content_type),
            Self::Frame(_) | Self::Citation(_) | Self::Relationship(_) => None,
        }
    }

    pub fn into_item(self) -> LoreResult<KnowledgeItem> {
        match self {
            Self::Item(i) => Ok(i),
            other => Err(unexpected(EntityKind::Item, &other)),
        }
    }

    pub fn into_fragment(self) -> LoreResult<KnowledgeFragment> {
        match self {
            Self::Fragment(f) => Ok(f),
            other => Err(unexpected(EntityKind::Fragment, &other)),
        }
    }

    pub fn into_frame(self) -> LoreResult<VideoFrame> {
        match self {
            Self::Frame(f) => Ok(f),
            other => Err(unexpected(EntityKind::Frame, &other)),
        }
    }

    pub fn into_synthesized(self) -> LoreResult<SynthesizedEntity> {
        match self {
            Self::Synthesized(s) => Ok(s),
            other => Err(unexpected(EntityKind::Synthesized, &other)),
        }
    }
}

fn unexpected(expected: EntityKind, got: &Entity) -> LoreError {
    LoreError::invalid(format!(
        "{} is a {}, not a {expected}",
        got.id(),
        got.kind()
    ))
}

impl From<KnowledgeItem> for Entity {
    fn from(v: KnowledgeItem) -> Self {
        Self::Item(v)
    }
}

impl From<KnowledgeFragment> for Entity {
    fn from(v: KnowledgeFragment) -> Self {
        Self::Fragment(v)
    }
}

impl From<VideoFrame> for Entity {
    fn from(v: VideoFrame) -> Self {
        Self::Frame(v)
    }
}

impl From<Citation> for Entity {
    fn from(v: Citation) -> Self {
        Self::Citation(v)
    }
}

impl From<Relationship> for Entity {
    fn from(v: Relationship) -> Self {
        Self::Relationship(v)
    }
}

impl From<SynthesizedEntity> for Entity {
    fn from(v: SynthesizedEntity) -> Self {
        Self::Synthesized(v)
    }
}
