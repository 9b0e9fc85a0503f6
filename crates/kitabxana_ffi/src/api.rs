//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose catalog browsing, bookmarks, reading progress and preferences to
//!   Dart via FRB.
//! - Flatten core types into plain structs and strings.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through `ok` + `message` envelopes, never thrown.
//! - Every DB-backed call opens, uses and drops its own connection.

use kitabxana_core::db::open_db;
use kitabxana_core::repo::bookmark_repo::{BookmarkRepository, SqliteBookmarkRepository};
use kitabxana_core::repo::preferences_repo::{
    PreferencesRepository, SqlitePreferencesRepository,
};
use kitabxana_core::{
    core_version as core_version_inner, filter_books, init_logging as init_logging_inner,
    ping as ping_inner, search_hadiths as search_hadiths_inner, Book, BookQuery, BookmarkStore,
    Catalog, ContentKind, Preferences, PreferencesStore, ReadingSession, RepoResult, SortMode,
    TextAlignment, Theme, TimerDriver,
};
use log::warn;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

const STORE_DB_FILE_NAME: &str = "kitabxana.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static CATALOG: OnceLock<Result<Arc<Catalog>, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Sets the database file used by bookmark and preference calls.
///
/// # FFI contract
/// - `db_path` must be absolute.
/// - May be set once, before the first DB-backed call; repeating the same
///   path is accepted.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = Path::new(trimmed);
    if !requested.is_absolute() {
        return format!("db_path must be an absolute path, got `{trimmed}`");
    }

    let active = STORE_DB_PATH.get_or_init(|| requested.to_path_buf());
    if active == requested {
        String::new()
    } else {
        format!(
            "store already configured at `{}`; refusing to switch to `{trimmed}`",
            active.display()
        )
    }
}

/// Book row for list and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct BookItem {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Rating text as shipped, e.g. `4.8`.
    pub rating: String,
    pub thumbnail: String,
    /// Card color, `#RRGGBB` or `#AARRGGBB` when translucent.
    pub color_hex: String,
    pub description: String,
}

/// Book search envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSearchResponse {
    pub ok: bool,
    pub items: Vec<BookItem>,
    /// Category that actually narrowed the result, if any.
    pub applied_category: Option<String>,
    /// Sort mode that was applied (`popular|newest|alphabetical|top_rated`).
    pub applied_sort: String,
    pub message: String,
}

/// Hadith row with its 1-based display number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadithItem {
    pub id: String,
    pub number: u32,
    pub text: String,
    pub narrator: String,
    pub source: String,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Bookmark mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkResponse {
    pub ok: bool,
    /// Membership after the call.
    pub bookmarked: bool,
    pub message: String,
}

/// Bookmarked ids of one kind, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkListResponse {
    pub ok: bool,
    pub ids: Vec<String>,
    pub message: String,
}

/// Reading position inside the hadith list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressResponse {
    pub ok: bool,
    /// `(index + 1) / total`, or `0` for unknown ids.
    pub progress: f64,
    pub number: Option<u32>,
    pub total: u32,
    pub message: String,
}

/// Flat preferences record. Enum fields use their stored names.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesDto {
    /// `System|Light|Dark`.
    pub theme: String,
    pub font_size: f64,
    pub line_spacing: f64,
    /// `Leading|Center|Trailing`.
    pub text_alignment: String,
    pub notifications_enabled: bool,
    pub haptic_feedback: bool,
    pub sound_effects: bool,
    pub auto_save_progress: bool,
    pub offline_mode: bool,
    pub cloud_sync: bool,
    pub dua_of_the_day: bool,
    pub app_language: String,
    pub reading_goal: u32,
    pub username: String,
    pub has_seen_intro: bool,
}

/// Preferences load envelope. `preferences` holds defaults on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesResponse {
    pub ok: bool,
    pub preferences: PreferencesDto,
    pub message: String,
}

/// Filters and sorts the built-in books.
///
/// # FFI contract
/// - Unknown `sort` values fall back to `popular`.
/// - Unknown categories fall back to the full catalog.
#[flutter_rust_bridge::frb(sync)]
pub fn search_books(query: String, category: Option<String>, sort: String) -> BookSearchResponse {
    let sort_mode = SortMode::parse(sort.trim()).unwrap_or_else(|| {
        warn!("event=ffi_search_books module=ffi status=fallback reason=unknown_sort");
        SortMode::default()
    });
    let catalog = match catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            return BookSearchResponse {
                ok: false,
                items: Vec::new(),
                applied_category: None,
                applied_sort: sort_mode.as_str().to_string(),
                message: format!("search_books failed: {err}"),
            };
        }
    };

    let mut book_query = BookQuery::new(query).with_sort(sort_mode);
    if let Some(name) = category.filter(|name| !name.trim().is_empty()) {
        book_query = book_query.with_category(name);
    }

    let result = filter_books(&catalog, &book_query);
    let items = result.items.into_iter().map(to_book_item).collect::<Vec<_>>();
    let message = if items.is_empty() {
        "No results.".to_string()
    } else {
        format!("Found {} book(s).", items.len())
    };
    BookSearchResponse {
        ok: true,
        items,
        applied_category: result.applied_category,
        applied_sort: sort_mode.as_str().to_string(),
        message,
    }
}

/// Non-empty category names in ascending order.
#[flutter_rust_bridge::frb(sync)]
pub fn list_categories() -> Vec<String> {
    match catalog() {
        Ok(catalog) => catalog
            .category_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Hadiths matching `query` on text, narrator or source, in catalog order.
#[flutter_rust_bridge::frb(sync)]
pub fn search_hadiths(query: String) -> Vec<HadithItem> {
    let Ok(catalog) = catalog() else {
        return Vec::new();
    };
    search_hadiths_inner(&catalog, &query)
        .into_iter()
        .map(|hadith| HadithItem {
            id: hadith.id.clone(),
            number: catalog
                .display_number(ContentKind::Hadith, &hadith.id)
                .map_or(0, to_u32),
            text: hadith.text.clone(),
            narrator: hadith.narrator.clone(),
            source: hadith.source.clone(),
        })
        .collect()
}

/// Flips bookmark membership of `id` and persists it.
///
/// `kind` is one of `book|hadith|ayah`.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_bookmark(kind: String, id: String) -> BookmarkResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        with_bookmarks(kind, |store| {
            let bookmarked = store.toggle(kind, &id);
            Ok(bookmarked)
        })
    });
    match result {
        Ok(true) => BookmarkResponse {
            ok: true,
            bookmarked: true,
            message: "Bookmarked.".to_string(),
        },
        Ok(false) => BookmarkResponse {
            ok: true,
            bookmarked: false,
            message: "Bookmark removed.".to_string(),
        },
        Err(err) => BookmarkResponse {
            ok: false,
            bookmarked: false,
            message: format!("toggle_bookmark failed: {err}"),
        },
    }
}

/// Removes `id` from bookmarks; absent ids are not an error.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_bookmark(kind: String, id: String) -> BookmarkResponse {
    let result = parse_kind(&kind)
        .and_then(|kind| with_bookmarks(kind, |store| Ok(store.remove(kind, &id))));
    match result {
        Ok(removed) => BookmarkResponse {
            ok: true,
            bookmarked: false,
            message: if removed {
                "Bookmark removed.".to_string()
            } else {
                "Not bookmarked.".to_string()
            },
        },
        Err(err) => BookmarkResponse {
            ok: false,
            bookmarked: false,
            message: format!("remove_bookmark failed: {err}"),
        },
    }
}

/// Bookmarked ids of `kind` that still exist in the catalog, in catalog order.
#[flutter_rust_bridge::frb(sync)]
pub fn list_bookmarks(kind: String) -> BookmarkListResponse {
    let result = parse_kind(&kind).and_then(|kind| {
        let catalog = catalog()?;
        let ids = with_store_connection(|conn| SqliteBookmarkRepository::new(conn).load(kind))?;
        let resolved: Vec<String> = match kind {
            ContentKind::Book => catalog
                .resolve_books(&ids)
                .into_iter()
                .map(|book| book.id.clone())
                .collect(),
            ContentKind::Hadith => catalog
                .resolve_hadiths(&ids)
                .into_iter()
                .map(|hadith| hadith.id.clone())
                .collect(),
            ContentKind::Ayah => catalog
                .resolve_ayahs(&ids)
                .into_iter()
                .map(|ayah| ayah.id.clone())
                .collect(),
        };
        Ok(resolved)
    });
    match result {
        Ok(ids) => BookmarkListResponse {
            ok: true,
            message: format!("{} bookmark(s).", ids.len()),
            ids,
        },
        Err(err) => BookmarkListResponse {
            ok: false,
            ids: Vec::new(),
            message: format!("list_bookmarks failed: {err}"),
        },
    }
}

/// Progress a reader at hadith `id` has made through the hadith list.
#[flutter_rust_bridge::frb(sync)]
pub fn hadith_progress(id: String) -> ProgressResponse {
    let catalog = match catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            return ProgressResponse {
                ok: false,
                progress: 0.0,
                number: None,
                total: 0,
                message: format!("hadith_progress failed: {err}"),
            };
        }
    };

    let number = catalog
        .display_number(ContentKind::Hadith, &id)
        .map(to_u32);
    let total = to_u32(catalog.len(ContentKind::Hadith));
    let mut session =
        ReadingSession::with_driver(Arc::clone(&catalog), ContentKind::Hadith, TimerDriver::Manual);
    let progress = session.select(id);
    ProgressResponse {
        ok: true,
        progress,
        number,
        total,
        message: match number {
            Some(number) => format!("{number}/{total}"),
            None => "Unknown hadith.".to_string(),
        },
    }
}

/// Loads saved preferences; missing or malformed keys take their defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn load_preferences() -> PreferencesResponse {
    match with_store_connection(|conn| {
        PreferencesStore::load_from(&SqlitePreferencesRepository::new(conn))
    }) {
        Ok(store) => PreferencesResponse {
            ok: true,
            preferences: to_preferences_dto(store.get()),
            message: "Preferences loaded.".to_string(),
        },
        Err(err) => PreferencesResponse {
            ok: false,
            preferences: to_preferences_dto(&Preferences::default()),
            message: format!("load_preferences failed: {err}"),
        },
    }
}

/// Replaces every saved preference with `preferences`.
#[flutter_rust_bridge::frb(sync)]
pub fn save_preferences(preferences: PreferencesDto) -> ActionResponse {
    let preferences = from_preferences_dto(preferences);
    match with_store_connection(|conn| SqlitePreferencesRepository::new(conn).save(&preferences))
    {
        Ok(()) => ActionResponse::success("Preferences saved."),
        Err(err) => ActionResponse::failure(format!("save_preferences failed: {err}")),
    }
}

/// Restores every preference to its default.
#[flutter_rust_bridge::frb(sync)]
pub fn reset_preferences() -> ActionResponse {
    match with_store_connection(|conn| SqlitePreferencesRepository::new(conn).reset()) {
        Ok(()) => ActionResponse::success("Preferences reset."),
        Err(err) => ActionResponse::failure(format!("reset_preferences failed: {err}")),
    }
}

fn catalog() -> Result<Arc<Catalog>, String> {
    CATALOG
        .get_or_init(|| {
            Catalog::builtin()
                .map(Arc::new)
                .map_err(|err| format!("built-in catalog is invalid: {err}"))
        })
        .clone()
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("KITABXANA_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn with_store_connection<T>(f: impl FnOnce(&Connection) -> RepoResult<T>) -> Result<T, String> {
    let db_path = resolve_store_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("store DB open failed: {err}"))?;
    f(&conn).map_err(|err| err.to_string())
}

/// Loads bookmarks, applies `f`, and writes back only the `kind` set.
fn with_bookmarks<T>(
    kind: ContentKind,
    f: impl FnOnce(&mut BookmarkStore) -> RepoResult<T>,
) -> Result<T, String> {
    with_store_connection(|conn| {
        let repo = SqliteBookmarkRepository::new(conn);
        let mut store = BookmarkStore::load_from(&repo)?;
        let value = f(&mut store)?;
        repo.replace(kind, &store.all(kind))?;
        Ok(value)
    })
}

fn parse_kind(kind: &str) -> Result<ContentKind, String> {
    ContentKind::parse(kind.trim())
        .ok_or_else(|| format!("unknown content kind `{kind}`; expected book|hadith|ayah"))
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_book_item(book: &Book) -> BookItem {
    BookItem {
        id: book.id.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
        rating: book.rating.clone(),
        thumbnail: book.thumbnail.clone(),
        color_hex: book.color.to_hex(),
        description: book.description.clone(),
    }
}

fn to_preferences_dto(preferences: &Preferences) -> PreferencesDto {
    PreferencesDto {
        theme: preferences.theme.as_str().to_string(),
        font_size: preferences.font_size,
        line_spacing: preferences.line_spacing,
        text_alignment: preferences.text_alignment.as_str().to_string(),
        notifications_enabled: preferences.notifications_enabled,
        haptic_feedback: preferences.haptic_feedback,
        sound_effects: preferences.sound_effects,
        auto_save_progress: preferences.auto_save_progress,
        offline_mode: preferences.offline_mode,
        cloud_sync: preferences.cloud_sync,
        dua_of_the_day: preferences.dua_of_the_day,
        app_language: preferences.app_language.clone(),
        reading_goal: preferences.reading_goal,
        username: preferences.username.clone(),
        has_seen_intro: preferences.has_seen_intro,
    }
}

fn from_preferences_dto(dto: PreferencesDto) -> Preferences {
    let defaults = Preferences::default();
    Preferences {
        theme: Theme::from_stored(&dto.theme),
        font_size: finite_or(dto.font_size, defaults.font_size),
        line_spacing: finite_or(dto.line_spacing, defaults.line_spacing),
        text_alignment: TextAlignment::from_stored(&dto.text_alignment),
        notifications_enabled: dto.notifications_enabled,
        haptic_feedback: dto.haptic_feedback,
        sound_effects: dto.sound_effects,
        auto_save_progress: dto.auto_save_progress,
        offline_mode: dto.offline_mode,
        cloud_sync: dto.cloud_sync,
        dua_of_the_day: dto.dua_of_the_day,
        app_language: dto.app_language,
        reading_goal: dto.reading_goal,
        username: dto.username,
        has_seen_intro: dto.has_seen_intro,
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
