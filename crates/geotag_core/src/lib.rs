//! Geo-location metadata for content items and its GeoRSS feed output.
//! This crate owns the sanitization rules and the feed markup contract.

pub mod config;
pub mod db;
pub mod extension;
pub mod feed;
pub mod logging;
pub mod model;
pub mod repo;
pub mod sanitize;
pub mod service;

pub use config::{ConfigError, GeoLocateConfig};
pub use extension::feed_registry::{FeedExtension, FeedExtensionRegistry, FeedRegistryError};
pub use extension::fields::{
    FieldRegistryError, MetaFieldRegistry, MetaFieldSpec, MetaSanitizer, MetaValueType,
};
pub use feed::document::{write_feed, FeedChannel};
pub use feed::escape::escape_feed_text;
pub use feed::render::{render_geo_record, render_namespace_declaration};
pub use feed::FeedDialect;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::content::{ContentId, ContentItem, ContentKind};
pub use model::geo::{GeoField, GeoRecord};
pub use model::meta_value::MetaValue;
pub use repo::content_repo::{ContentListQuery, ContentRepository, SqliteContentRepository};
pub use repo::meta_store::{MetaStore, SqliteMetaStore};
pub use repo::{RepoError, RepoResult};
pub use sanitize::{sanitize_coordinate, sanitize_public_flag, sanitize_text_field};
pub use service::geo_service::{
    geo_field_specs, register_geo_fields, unregister_geo_fields, GeoLocate, GEO_EXTENSION_ID,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
