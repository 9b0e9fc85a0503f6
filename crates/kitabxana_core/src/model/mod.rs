//! Domain model for catalog content and user settings.
//!
//! # Responsibility
//! - Define the immutable content records the catalog is built from.
//! - Define the preference records consumed by stores and the presentation layer.
//!
//! # Invariants
//! - Content records are identified by an `EntityId` unique per `ContentKind`.
//! - Preference records always carry a complete set of values; defaults come
//!   from `Default` impls only.

pub mod color;
pub mod content;
pub mod preferences;
pub mod reader_settings;
pub mod session;
