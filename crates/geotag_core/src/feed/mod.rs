//! Feed output for geo metadata.
//!
//! # Responsibility
//! - Name the feed dialects the extension attaches to.
//! - Escape text for embedding in feed XML.
//! - Render the GeoRSS/W3C geo namespace declaration and item markup.
//! - Write complete feed documents by driving registered extensions.
//!
//! # Invariants
//! - Namespace and item fragments are identical across dialects.
//! - Fragments never open or close a wrapping element.

pub mod document;
pub mod escape;
pub mod render;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Syndication format of one generated feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedDialect {
    /// RSS 0.92.
    Rss,
    /// RSS 2.0.
    Rss2,
    /// Atom 1.0.
    Atom,
    /// RSS 1.0 (RDF).
    Rdf,
}

impl FeedDialect {
    pub const ALL: [FeedDialect; 4] = [
        FeedDialect::Rss,
        FeedDialect::Rss2,
        FeedDialect::Atom,
        FeedDialect::Rdf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rss => "rss",
            Self::Rss2 => "rss2",
            Self::Atom => "atom",
            Self::Rdf => "rdf",
        }
    }
}

impl Display for FeedDialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedDialect {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rss" => Ok(Self::Rss),
            "rss2" => Ok(Self::Rss2),
            "atom" => Ok(Self::Atom),
            "rdf" => Ok(Self::Rdf),
            other => Err(format!(
                "unsupported feed dialect `{other}`; expected rss|rss2|atom|rdf"
            )),
        }
    }
}
