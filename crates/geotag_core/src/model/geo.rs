//! Geo-location record model.
//!
//! # Responsibility
//! - Name the four stored geo fields.
//! - Define the canonical record resolved from them.
//!
//! # Invariants
//! - `is_populated` is derived from the other fields at construction and is
//!   never stored.
//! - Coordinates are either finite and non-zero, or `None`.

use serde::Serialize;

/// Default prefix under which geo fields are stored in the meta table.
pub const DEFAULT_META_PREFIX: &str = "geo_";

/// One of the fixed geo metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeoField {
    Public,
    Latitude,
    Longitude,
    Address,
}

impl GeoField {
    pub const ALL: [GeoField; 4] = [
        GeoField::Public,
        GeoField::Latitude,
        GeoField::Longitude,
        GeoField::Address,
    ];

    /// Unprefixed field name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::Address => "address",
        }
    }

    /// Storage key for this field under `prefix`, e.g. `geo_latitude`.
    pub fn meta_key(self, prefix: &str) -> String {
        format!("{prefix}{}", self.name())
    }
}

/// Sanitized geo metadata for one content item.
///
/// Always fully populated, so callers never need presence checks on the
/// record itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRecord {
    pub is_public: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub label: String,
    pub is_populated: bool,
}

impl GeoRecord {
    /// Builds a record and derives `is_populated`.
    pub fn new(
        is_public: bool,
        latitude: Option<f64>,
        longitude: Option<f64>,
        label: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let is_populated = latitude.is_some() && longitude.is_some() && !label.is_empty();
        Self {
            is_public,
            latitude,
            longitude,
            label,
            is_populated,
        }
    }

    /// Record for an item with no geo metadata at all.
    pub fn empty() -> Self {
        Self::new(false, None, None, String::new())
    }
}

impl Default for GeoRecord {
    fn default() -> Self {
        Self::empty()
    }
}
