//! Core use-case services.
//!
//! # Responsibility
//! - Compose sanitizers, the meta store and feed rendering into the geo
//!   location component hosts wire up at startup.

pub mod geo_service;
