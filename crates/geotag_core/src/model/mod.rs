//! Domain model for content items and their geo metadata.
//!
//! # Responsibility
//! - Define content item identity shared by storage and feed rendering.
//! - Define the untyped metadata scalar held by the generic meta store.
//! - Define the derived geo record read from that store.
//!
//! # Invariants
//! - Every content item is identified by a stable `ContentId`.
//! - `GeoRecord` is never persisted; it is recomputed on each read.

pub mod content;
pub mod geo;
pub mod meta_value;
