//! Catalog search and filtering.
//!
//! # Responsibility
//! - Produce the visible, ordered subset of books for a query/category/sort.
//! - Provide substring search over hadiths and ayahs for the reader.
//!
//! # Invariants
//! - Filtering is pure: no side effects on the catalog.
//! - Output order is deterministic for identical inputs.

pub mod filter;
