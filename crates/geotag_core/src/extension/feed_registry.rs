//! Feed callback registry.
//!
//! Extensions contribute namespace attributes to the feed root element and
//! markup inside each item. The registry borrows extensions, so components
//! are built once by the caller and handed in by reference.

use crate::feed::FeedDialect;
use crate::model::content::ContentId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Callbacks invoked by the feed writer.
pub trait FeedExtension {
    /// Stable extension identifier, e.g. `builtin.geo.locate`.
    fn extension_id(&self) -> &str;

    /// Dialects this extension attaches to.
    fn dialects(&self) -> &[FeedDialect];

    /// Attribute text for the root element start tag. Called once per feed.
    fn namespace_attributes(&self, dialect: FeedDialect) -> String;

    /// Markup placed inside the item element. Called once per item.
    fn item_markup(&self, dialect: FeedDialect, item: ContentId) -> String;
}

/// In-process registry of feed extensions.
#[derive(Default)]
pub struct FeedExtensionRegistry<'ext> {
    extensions: BTreeMap<String, &'ext dyn FeedExtension>,
}

impl<'ext> FeedExtensionRegistry<'ext> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one extension after id validation.
    pub fn register(
        &mut self,
        extension: &'ext dyn FeedExtension,
    ) -> Result<(), FeedRegistryError> {
        let id = extension.extension_id().trim();
        if !is_valid_extension_id(id) {
            return Err(FeedRegistryError::InvalidExtensionId(id.to_string()));
        }
        if self.extensions.contains_key(id) {
            return Err(FeedRegistryError::DuplicateExtensionId(id.to_string()));
        }
        self.extensions.insert(id.to_string(), extension);
        Ok(())
    }

    /// Removes one extension. Returns whether it was registered.
    pub fn unregister(&mut self, extension_id: &str) -> bool {
        self.extensions.remove(extension_id.trim()).is_some()
    }

    pub fn contains(&self, extension_id: &str) -> bool {
        self.extensions.contains_key(extension_id)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Concatenated namespace attributes of extensions attached to `dialect`.
    pub fn namespace_fragment(&self, dialect: FeedDialect) -> String {
        self.attached(dialect)
            .map(|extension| extension.namespace_attributes(dialect))
            .collect()
    }

    /// Concatenated item markup of extensions attached to `dialect`.
    pub fn item_fragment(&self, dialect: FeedDialect, item: ContentId) -> String {
        self.attached(dialect)
            .map(|extension| extension.item_markup(dialect, item))
            .collect()
    }

    fn attached(&self, dialect: FeedDialect) -> impl Iterator<Item = &'ext dyn FeedExtension> + '_ {
        self.extensions
            .values()
            .copied()
            .filter(move |extension| extension.dialects().contains(&dialect))
    }
}

fn is_valid_extension_id(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first.is_ascii_digit() => {}
        _ => return false,
    }

    let mut prev_separator = false;
    for c in chars {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_separator = false;
        } else if matches!(c, '.' | '_' | '-') && !prev_separator {
            prev_separator = true;
        } else {
            return false;
        }
    }
    !prev_separator
}

/// Feed registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedRegistryError {
    InvalidExtensionId(String),
    DuplicateExtensionId(String),
}

impl Display for FeedRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExtensionId(value) => write!(f, "feed extension id is invalid: {value}"),
            Self::DuplicateExtensionId(value) => {
                write!(f, "feed extension id already registered: {value}")
            }
        }
    }
}

impl Error for FeedRegistryError {}

#[cfg(test)]
mod tests {
    use super::{is_valid_extension_id, FeedExtension, FeedExtensionRegistry, FeedRegistryError};
    use crate::feed::FeedDialect;
    use crate::model::content::ContentId;
    use uuid::Uuid;

    struct Stub {
        id: &'static str,
        dialects: Vec<FeedDialect>,
    }

    impl FeedExtension for Stub {
        fn extension_id(&self) -> &str {
            self.id
        }

        fn dialects(&self) -> &[FeedDialect] {
            &self.dialects
        }

        fn namespace_attributes(&self, dialect: FeedDialect) -> String {
            format!("xmlns:{}=\"urn:{dialect}\" ", self.id.replace('.', "_"))
        }

        fn item_markup(&self, _dialect: FeedDialect, item: ContentId) -> String {
            format!("<{id}>{item}</{id}>", id = self.id)
        }
    }

    #[test]
    fn only_attached_dialects_receive_fragments() {
        let atom_only = Stub {
            id: "stub.atom",
            dialects: vec![FeedDialect::Atom],
        };
        let mut registry = FeedExtensionRegistry::new();
        registry.register(&atom_only).expect("register stub");

        assert_eq!(
            registry.namespace_fragment(FeedDialect::Atom),
            "xmlns:stub_atom=\"urn:atom\" "
        );
        assert_eq!(registry.namespace_fragment(FeedDialect::Rss2), "");
        assert_eq!(registry.item_fragment(FeedDialect::Rdf, Uuid::nil()), "");
    }

    #[test]
    fn fragments_concatenate_in_id_order() {
        let first = Stub {
            id: "a.first",
            dialects: FeedDialect::ALL.to_vec(),
        };
        let second = Stub {
            id: "b.second",
            dialects: FeedDialect::ALL.to_vec(),
        };
        let mut registry = FeedExtensionRegistry::new();
        registry.register(&second).expect("register second");
        registry.register(&first).expect("register first");

        let item = Uuid::nil();
        assert_eq!(
            registry.item_fragment(FeedDialect::Rss2, item),
            format!("<a.first>{item}</a.first><b.second>{item}</b.second>")
        );
    }

    #[test]
    fn rejects_duplicate_and_invalid_ids() {
        let stub = Stub {
            id: "stub.geo",
            dialects: vec![],
        };
        let bad = Stub {
            id: "Stub Geo",
            dialects: vec![],
        };
        let mut registry = FeedExtensionRegistry::new();
        registry.register(&stub).expect("first registration");
        assert_eq!(
            registry.register(&stub),
            Err(FeedRegistryError::DuplicateExtensionId("stub.geo".to_string()))
        );
        assert_eq!(
            registry.register(&bad),
            Err(FeedRegistryError::InvalidExtensionId("Stub Geo".to_string()))
        );
    }

    #[test]
    fn unregister_detaches_extension() {
        let stub = Stub {
            id: "stub.geo",
            dialects: FeedDialect::ALL.to_vec(),
        };
        let mut registry = FeedExtensionRegistry::new();
        registry.register(&stub).expect("register stub");
        assert!(registry.unregister("stub.geo"));
        assert!(!registry.unregister("stub.geo"));
        assert!(registry.is_empty());
        assert_eq!(registry.namespace_fragment(FeedDialect::Atom), "");
    }

    #[test]
    fn validates_extension_id_shape() {
        assert!(is_valid_extension_id("builtin.geo.locate"));
        assert!(is_valid_extension_id("geo-2"));
        assert!(!is_valid_extension_id(""));
        assert!(!is_valid_extension_id(".geo"));
        assert!(!is_valid_extension_id("geo..locate"));
        assert!(!is_valid_extension_id("geo."));
    }
}
