//! Geo location component.
//!
//! # Responsibility
//! - Resolve the canonical `GeoRecord` of a content item from raw meta rows.
//! - Render feed namespace and item markup for public records.
//! - Declare the geo meta fields and attach to feed registries.
//!
//! # Invariants
//! - Resolution is total: store failures degrade to absent fields.
//! - Resolution never writes to the store.
//! - Built once by the host and passed by reference; there is no global
//!   instance.

use crate::config::GeoLocateConfig;
use crate::extension::feed_registry::{FeedExtension, FeedExtensionRegistry, FeedRegistryError};
use crate::extension::fields::{
    FieldRegistryError, MetaFieldRegistry, MetaFieldSpec, MetaSanitizer, MetaValueType,
};
use crate::feed::render::{render_geo_record, render_namespace_declaration};
use crate::feed::FeedDialect;
use crate::model::content::{ContentId, ContentKind};
use crate::model::geo::{GeoField, GeoRecord};
use crate::model::meta_value::MetaValue;
use crate::repo::meta_store::MetaStore;
use crate::repo::RepoResult;
use crate::sanitize::{
    sanitize_coordinate, sanitize_coordinate_meta, sanitize_public_flag, sanitize_public_meta,
    sanitize_text_meta,
};
use log::{debug, warn};

/// Extension id used for feed registration.
pub const GEO_EXTENSION_ID: &str = "builtin.geo.locate";

/// Field declarations for the four geo fields under `config.meta_prefix`.
pub fn geo_field_specs(config: &GeoLocateConfig) -> Vec<MetaFieldSpec> {
    GeoField::ALL
        .into_iter()
        .map(|field| {
            let (value_type, sanitizer): (MetaValueType, MetaSanitizer) = match field {
                GeoField::Public => (MetaValueType::String, sanitize_public_meta),
                GeoField::Latitude | GeoField::Longitude => {
                    (MetaValueType::Float, sanitize_coordinate_meta)
                }
                GeoField::Address => (MetaValueType::String, sanitize_text_meta),
            };
            MetaFieldSpec {
                key: field.meta_key(&config.meta_prefix),
                value_type,
                single: true,
                sanitizer,
            }
        })
        .collect()
}

/// Registers the geo field declarations (write-time sanitizers).
///
/// Registration is all-or-nothing: on error, fields added by this call are
/// removed again.
pub fn register_geo_fields(
    registry: &mut MetaFieldRegistry,
    config: &GeoLocateConfig,
) -> Result<(), FieldRegistryError> {
    let mut added: Vec<String> = Vec::new();
    for spec in geo_field_specs(config) {
        let key = spec.key.clone();
        if let Err(err) = registry.register(spec) {
            for key in &added {
                registry.unregister(key);
            }
            return Err(err);
        }
        added.push(key);
    }
    Ok(())
}

/// Removes the geo field declarations.
pub fn unregister_geo_fields(registry: &mut MetaFieldRegistry, config: &GeoLocateConfig) {
    for field in GeoField::ALL {
        registry.unregister(&field.meta_key(&config.meta_prefix));
    }
}

/// Geo location component over a meta store.
pub struct GeoLocate<S: MetaStore> {
    store: S,
    config: GeoLocateConfig,
}

impl<S: MetaStore> GeoLocate<S> {
    pub fn new(store: S, config: GeoLocateConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GeoLocateConfig {
        &self.config
    }

    /// Storage key of `field` under the configured prefix.
    pub fn field_key(&self, field: GeoField) -> String {
        field.meta_key(&self.config.meta_prefix)
    }

    /// Whether items of `kind` accept geo-location edits.
    pub fn supports_kind(&self, kind: ContentKind) -> bool {
        self.config.supported_kinds.contains(&kind)
    }

    /// Reads and sanitizes the geo fields of `item`.
    ///
    /// Always returns a complete record; an item without metadata resolves
    /// to a private, unpopulated record.
    pub fn resolve_geo_record(&self, item: ContentId) -> GeoRecord {
        let public = self.read_field(item, GeoField::Public);
        let latitude = self.read_field(item, GeoField::Latitude);
        let longitude = self.read_field(item, GeoField::Longitude);
        let label = self.read_field(item, GeoField::Address);

        let record = GeoRecord::new(
            sanitize_public_flag(&public),
            sanitize_coordinate(&latitude),
            sanitize_coordinate(&longitude),
            label.to_text(),
        );
        debug!(
            "event=geo_resolve module=geo status=ok item_id={item} is_public={} is_populated={}",
            record.is_public, record.is_populated
        );
        record
    }

    /// Namespace attributes for the feed root element.
    pub fn render_namespace_declaration(&self) -> &'static str {
        render_namespace_declaration()
    }

    /// Item markup for `item`; empty unless its record is public.
    pub fn render_item(&self, item: ContentId) -> String {
        let record = self.resolve_geo_record(item);
        if self.config.require_populated && !record.is_populated {
            return String::new();
        }
        render_geo_record(&record)
    }

    /// Writes one geo field through the store.
    ///
    /// The store's field registry decides how the value is normalized.
    pub fn write_field(
        &self,
        item: ContentId,
        field: GeoField,
        value: &MetaValue,
    ) -> RepoResult<()> {
        self.store.update_meta(item, &self.field_key(field), value)
    }

    /// Attaches this component to `feeds`.
    pub fn install<'ext>(
        &'ext self,
        feeds: &mut FeedExtensionRegistry<'ext>,
    ) -> Result<(), FeedRegistryError>
    where
        S: 'ext,
    {
        feeds.register(self)
    }

    /// Detaches this component from `feeds`.
    pub fn uninstall(&self, feeds: &mut FeedExtensionRegistry<'_>) -> bool {
        feeds.unregister(GEO_EXTENSION_ID)
    }

    fn read_field(&self, item: ContentId, field: GeoField) -> MetaValue {
        let key = self.field_key(field);
        match self.store.get_single(item, &key) {
            Ok(value) => value.unwrap_or(MetaValue::Null),
            Err(err) => {
                warn!(
                    "event=geo_resolve module=geo status=degraded item_id={item} key={key} error={err}"
                );
                MetaValue::Null
            }
        }
    }
}

impl<S: MetaStore> FeedExtension for GeoLocate<S> {
    fn extension_id(&self) -> &str {
        GEO_EXTENSION_ID
    }

    fn dialects(&self) -> &[FeedDialect] {
        &self.config.feed_dialects
    }

    fn namespace_attributes(&self, _dialect: FeedDialect) -> String {
        self.render_namespace_declaration().to_string()
    }

    fn item_markup(&self, _dialect: FeedDialect, item: ContentId) -> String {
        self.render_item(item)
    }
}
