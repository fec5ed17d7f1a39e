//! Extension registration contracts.
//!
//! This module holds the host-side tables an extension registers into: meta
//! field declarations with their write-time sanitizers, and feed callbacks
//! per dialect. Registries are plain values owned by the caller; nothing
//! here is global.

pub mod feed_registry;
pub mod fields;
