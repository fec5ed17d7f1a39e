//! Content item model.
//!
//! # Responsibility
//! - Define the syndicated unit (post, page, attachment) that metadata
//!   attaches to.
//!
//! # Invariants
//! - `id` is stable and never reused for another item.
//! - `title` is stored as entered; feed writers escape it on output.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for every content item.
pub type ContentId = Uuid;

/// Category of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Dated entry that shows up in feeds.
    Post,
    /// Static page.
    Page,
    /// Uploaded media item.
    Attachment,
}

impl ContentKind {
    /// Stable string id used in storage and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Page => "page",
            Self::Attachment => "attachment",
        }
    }
}

impl FromStr for ContentKind {
    type Err = UnknownContentKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "post" => Ok(Self::Post),
            "page" => Ok(Self::Page),
            "attachment" => Ok(Self::Attachment),
            other => Err(UnknownContentKind(other.to_string())),
        }
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for content kind strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContentKind(pub String);

impl Display for UnknownContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown content kind `{}`; expected post|page|attachment",
            self.0
        )
    }
}

impl Error for UnknownContentKind {}

/// Canonical content record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub title: String,
}

impl ContentItem {
    /// Creates a new item with a generated stable ID.
    pub fn new(kind: ContentKind, title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), kind, title)
    }

    /// Creates an item with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: ContentId, kind: ContentKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
        }
    }
}
