//! Stateful stores behind the presentation layer.
//!
//! # Responsibility
//! - Own mutable user state: bookmarks, the reading session, preferences.
//! - Publish a `StateChange` for every effective mutation.
//! - Load from and save to repositories without exposing SQL.

pub mod bookmark_service;
pub mod preferences_service;
pub mod session_service;
