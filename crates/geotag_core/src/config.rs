//! Geo extension configuration.
//!
//! # Responsibility
//! - Hold the knobs hosts may tune: storage prefix, supported content kinds,
//!   feed dialects and the public-but-incomplete render policy.
//! - Load configuration from JSON with a default for every field.
//!
//! # Invariants
//! - A validated config has a non-empty `[a-z0-9_]` prefix and at least one
//!   feed dialect.

use crate::feed::FeedDialect;
use crate::model::content::ContentKind;
use crate::model::geo::DEFAULT_META_PREFIX;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Configuration for [`crate::GeoLocate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeoLocateConfig {
    /// Prefix prepended to every geo field name in the meta store.
    pub meta_prefix: String,
    /// Content kinds that accept geo-location edits.
    pub supported_kinds: Vec<ContentKind>,
    /// Feed dialects the renderer attaches to.
    pub feed_dialects: Vec<FeedDialect>,
    /// When set, public records without complete data render nothing.
    pub require_populated: bool,
}

impl Default for GeoLocateConfig {
    fn default() -> Self {
        Self {
            meta_prefix: DEFAULT_META_PREFIX.to_string(),
            supported_kinds: vec![ContentKind::Post, ContentKind::Page],
            feed_dialects: FeedDialect::ALL.to_vec(),
            require_populated: false,
        }
    }
}

impl GeoLocateConfig {
    /// Parses and validates a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    /// Validates cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.meta_prefix.is_empty() {
            return Err(ConfigError::EmptyMetaPrefix);
        }
        let prefix_ok = self
            .meta_prefix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !prefix_ok {
            return Err(ConfigError::InvalidMetaPrefix(self.meta_prefix.clone()));
        }
        if self.feed_dialects.is_empty() {
            return Err(ConfigError::NoFeedDialects);
        }
        Ok(())
    }
}

/// Configuration load/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Read { path: String, message: String },
    Parse(String),
    EmptyMetaPrefix,
    InvalidMetaPrefix(String),
    NoFeedDialects,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "failed to read config `{path}`: {message}")
            }
            Self::Parse(message) => write!(f, "invalid config json: {message}"),
            Self::EmptyMetaPrefix => write!(f, "meta_prefix must not be empty"),
            Self::InvalidMetaPrefix(value) => write!(
                f,
                "meta_prefix `{value}` is invalid; expected lowercase letters, digits or `_`"
            ),
            Self::NoFeedDialects => write!(f, "feed_dialects must not be empty"),
        }
    }
}

impl Error for ConfigError {}
