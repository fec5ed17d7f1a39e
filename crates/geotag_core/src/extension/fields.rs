//! Meta field declarations and write-time sanitization.
//!
//! # Invariants
//! - Field keys are unique and non-empty.
//! - Writes to a registered key always pass through its sanitizer.
//! - Writes to unknown keys pass through unchanged.

use crate::model::meta_value::MetaValue;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Normalizer attached to one field.
pub type MetaSanitizer = fn(&MetaValue) -> MetaValue;

/// Declared storage type of a meta field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaValueType {
    String,
    Float,
}

/// Declaration of one meta field.
#[derive(Debug, Clone)]
pub struct MetaFieldSpec {
    /// Full storage key, prefix included.
    pub key: String,
    pub value_type: MetaValueType,
    /// Whether readers use single-value mode for this key.
    pub single: bool,
    pub sanitizer: MetaSanitizer,
}

/// Registry of declared meta fields.
#[derive(Debug, Clone, Default)]
pub struct MetaFieldRegistry {
    fields: BTreeMap<String, MetaFieldSpec>,
}

impl MetaFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one field declaration.
    pub fn register(&mut self, spec: MetaFieldSpec) -> Result<(), FieldRegistryError> {
        let key = spec.key.trim();
        if key.is_empty() {
            return Err(FieldRegistryError::EmptyKey);
        }
        if self.fields.contains_key(key) {
            return Err(FieldRegistryError::DuplicateKey(key.to_string()));
        }
        self.fields.insert(key.to_string(), spec);
        Ok(())
    }

    /// Removes one field declaration, returning it when present.
    pub fn unregister(&mut self, key: &str) -> Option<MetaFieldSpec> {
        self.fields.remove(key.trim())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Applies the registered sanitizer for `key`, if any.
    pub fn sanitize_for_write(&self, key: &str, value: &MetaValue) -> MetaValue {
        match self.fields.get(key) {
            Some(spec) => (spec.sanitizer)(value),
            None => value.clone(),
        }
    }
}

/// Field registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRegistryError {
    EmptyKey,
    DuplicateKey(String),
}

impl Display for FieldRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "meta field key must not be empty"),
            Self::DuplicateKey(key) => write!(f, "meta field already registered: {key}"),
        }
    }
}

impl Error for FieldRegistryError {}

#[cfg(test)]
mod tests {
    use super::{FieldRegistryError, MetaFieldRegistry, MetaFieldSpec, MetaValueType};
    use crate::model::meta_value::MetaValue;

    fn uppercase(value: &MetaValue) -> MetaValue {
        MetaValue::Text(value.to_text().to_uppercase())
    }

    fn spec(key: &str) -> MetaFieldSpec {
        MetaFieldSpec {
            key: key.to_string(),
            value_type: MetaValueType::String,
            single: true,
            sanitizer: uppercase,
        }
    }

    #[test]
    fn sanitizes_registered_keys_only() {
        let mut registry = MetaFieldRegistry::new();
        registry.register(spec("shout")).expect("register field");

        assert_eq!(
            registry.sanitize_for_write("shout", &MetaValue::from("hi")),
            MetaValue::from("HI")
        );
        assert_eq!(
            registry.sanitize_for_write("other", &MetaValue::from("hi")),
            MetaValue::from("hi")
        );
    }

    #[test]
    fn rejects_empty_and_duplicate_keys() {
        let mut registry = MetaFieldRegistry::new();
        assert_eq!(
            registry.register(spec("  ")),
            Err(FieldRegistryError::EmptyKey)
        );
        registry.register(spec("shout")).expect("register field");
        assert_eq!(
            registry.register(spec("shout")),
            Err(FieldRegistryError::DuplicateKey("shout".to_string()))
        );
    }

    #[test]
    fn unregister_removes_hook() {
        let mut registry = MetaFieldRegistry::new();
        registry.register(spec("shout")).expect("register field");
        assert!(registry.unregister("shout").is_some());
        assert!(registry.is_empty());
        assert_eq!(
            registry.sanitize_for_write("shout", &MetaValue::from("hi")),
            MetaValue::from("hi")
        );
    }
}
