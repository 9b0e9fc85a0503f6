//! Flutter-facing bindings for the Kitabxana core.

pub mod api;
