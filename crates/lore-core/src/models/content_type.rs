use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LoreError, LoreResult};

/// Kind of source material an entity was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Article,
    Research,
    Book,
    Video,
    Image,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        Self::Text,
        Self::Article,
        Self::Research,
        Self::Book,
        Self::Video,
        Self::Image,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Article => "article",
            Self::Research => "research",
            Self::Book => "book",
            Self::Video => "video",
            Self::Image => "image",
        }
    }

    pub fn parse(s: &str) -> LoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| LoreError::invalid(format!("unknown content type: {s}")))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
