//! Core domain logic for Kitabxana, a Qur'an and Hadith reader.
//! This crate owns the catalog, filtering, bookmarks, reading sessions and
//! preferences; presentation layers only render what it returns.

pub mod catalog;
pub mod db;
pub mod events;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use catalog::{Catalog, CatalogError, CatalogResult, Category};
pub use events::{ChangeFeed, StateChange};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::color::DisplayColor;
pub use model::content::{Ayah, Book, ContentKind, EntityId, Hadith};
pub use model::preferences::{Preferences, TextAlignment, Theme};
pub use model::reader_settings::ReaderSettings;
pub use model::session::{SessionSnapshot, SessionState};
pub use repo::{RepoError, RepoResult};
pub use search::filter::{
    filter_books, search_ayahs, search_hadiths, BookQuery, BookSearchResult, SortMode,
};
pub use service::bookmark_service::BookmarkStore;
pub use service::preferences_service::PreferencesStore;
pub use service::session_service::{
    persist_session_if_enabled, restore_session, ReadingSession, TimerDriver,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
