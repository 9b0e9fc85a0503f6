//! Linear, case-insensitive substring filtering over the catalog.
//!
//! # Invariants
//! - Matching lowercases both sides with Unicode rules before comparing.
//! - An empty query keeps every candidate.
//! - Sorting is stable, so equal keys keep their working-set order.
//! - An unknown category key filters nothing and is reported through
//!   `BookSearchResult::applied_category == None`.

use crate::catalog::Catalog;
use crate::model::content::{Ayah, Book, Hadith};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Book list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Highest rating first.
    #[default]
    Popular,
    /// Reverse working-set order; the catalog has no timestamps.
    Newest,
    /// Ascending by title, codepoint order.
    Alphabetical,
    /// Highest rating first.
    TopRated,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        Self::Popular,
        Self::Newest,
        Self::Alphabetical,
        Self::TopRated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Newest => "newest",
            Self::Alphabetical => "alphabetical",
            Self::TopRated => "top_rated",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "popular" => Some(Self::Popular),
            "newest" => Some(Self::Newest),
            "alphabetical" => Some(Self::Alphabetical),
            "top_rated" => Some(Self::TopRated),
            _ => None,
        }
    }
}

/// Book filter request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    /// Matched against title and author. Empty keeps all books.
    pub text: String,
    /// Restrict to one category's book list.
    pub category: Option<String>,
    pub sort: SortMode,
}

impl BookQuery {
    /// Creates a query over the whole catalog with the default sort.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
            sort: SortMode::default(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }
}

/// Filter output.
#[derive(Debug, Clone, PartialEq)]
pub struct BookSearchResult<'a> {
    /// Visible books in display order.
    pub items: Vec<&'a Book>,
    /// Category actually used to narrow the working set. `None` when the
    /// request had no category or named one the catalog does not have.
    pub applied_category: Option<String>,
}

/// Filters and sorts books.
///
/// Never fails. Unparseable ratings sort as `0`, unknown categories fall back
/// to the full catalog.
pub fn filter_books<'a>(catalog: &'a Catalog, query: &BookQuery) -> BookSearchResult<'a> {
    let (working_set, applied_category) = match query.category.as_deref() {
        Some(name) => match catalog.category(name) {
            Some(category) => (category.books.as_slice(), Some(category.name.clone())),
            None => {
                debug!(
                    "event=book_filter module=search status=fallback reason=unknown_category"
                );
                (catalog.books(), None)
            }
        },
        None => (catalog.books(), None),
    };

    let needle = fold_case(&query.text);
    let mut items = working_set
        .iter()
        .filter(|book| {
            needle.is_empty()
                || contains_folded(&book.title, &needle)
                || contains_folded(&book.author, &needle)
        })
        .collect::<Vec<_>>();

    sort_books(&mut items, query.sort);

    debug!(
        "event=book_filter module=search status=ok sort={} query_len={} hits={}",
        query.sort.as_str(),
        query.text.chars().count(),
        items.len()
    );

    BookSearchResult {
        items,
        applied_category,
    }
}

/// Hadiths whose text, narrator or source contains `text`, in catalog order.
pub fn search_hadiths<'a>(catalog: &'a Catalog, text: &str) -> Vec<&'a Hadith> {
    let needle = fold_case(text);
    catalog
        .hadiths()
        .iter()
        .filter(|hadith| {
            needle.is_empty()
                || contains_folded(&hadith.text, &needle)
                || contains_folded(&hadith.narrator, &needle)
                || contains_folded(&hadith.source, &needle)
        })
        .collect()
}

/// Ayahs whose text or surah name contains `text`, in catalog order.
pub fn search_ayahs<'a>(catalog: &'a Catalog, text: &str) -> Vec<&'a Ayah> {
    let needle = fold_case(text);
    catalog
        .ayahs()
        .iter()
        .filter(|ayah| {
            needle.is_empty()
                || contains_folded(&ayah.text, &needle)
                || contains_folded(&ayah.surah, &needle)
        })
        .collect()
}

fn sort_books(items: &mut [&Book], sort: SortMode) {
    match sort {
        SortMode::Popular | SortMode::TopRated => {
            items.sort_by(|left, right| compare_rating_desc(left, right));
        }
        SortMode::Newest => items.reverse(),
        SortMode::Alphabetical => items.sort_by(|left, right| left.title.cmp(&right.title)),
    }
}

fn compare_rating_desc(left: &Book, right: &Book) -> Ordering {
    // Ratings are finite, so partial_cmp never returns None.
    right
        .rating_value()
        .partial_cmp(&left.rating_value())
        .unwrap_or(Ordering::Equal)
}

/// Lowercases per character. `str::to_lowercase` maps a final `Σ` to `ς`, so a
/// substring could fold differently from the same letters inside the full text.
fn fold_case(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

fn contains_folded(haystack: &str, needle_folded: &str) -> bool {
    fold_case(haystack).contains(needle_folded)
}

#[cfg(test)]
mod tests {
    use super::{filter_books, fold_case, BookQuery, SortMode};
    use crate::catalog::{Catalog, Category};
    use crate::model::color::DisplayColor;
    use crate::model::content::Book;

    fn book(id: &str, title: &str, author: &str, rating: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            rating: rating.to_string(),
            thumbnail: String::new(),
            color: DisplayColor::rgb(10, 20, 30),
            description: String::new(),
        }
    }

    fn ids(result: &[&Book]) -> Vec<String> {
        result.iter().map(|book| book.id.clone()).collect()
    }

    #[test]
    fn sort_mode_names_round_trip() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(SortMode::parse("rating"), None);
    }

    #[test]
    fn newest_reverses_working_set() {
        let catalog = Catalog::new(
            vec![
                book("a", "A", "x", "1"),
                book("b", "B", "x", "2"),
                book("c", "C", "x", "3"),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .expect("valid catalog");
        let result = filter_books(&catalog, &BookQuery::new("").with_sort(SortMode::Newest));
        assert_eq!(ids(&result.items), vec!["c", "b", "a"]);
    }

    #[test]
    fn alphabetical_is_stable_for_equal_titles() {
        let catalog = Catalog::new(
            vec![
                book("z", "Zad", "x", "1"),
                book("a1", "Adab", "first", "1"),
                book("a2", "Adab", "second", "5"),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .expect("valid catalog");
        let result = filter_books(
            &catalog,
            &BookQuery::new("").with_sort(SortMode::Alphabetical),
        );
        assert_eq!(ids(&result.items), vec!["a1", "a2", "z"]);
    }

    #[test]
    fn category_narrows_before_query() {
        let shared = book("s", "Shared", "x", "1");
        let catalog = Catalog::new(
            vec![shared.clone(), book("o", "Other shared", "x", "1")],
            Vec::new(),
            Vec::new(),
            vec![Category::new("Picked", vec![shared])],
        )
        .expect("valid catalog");

        let result = filter_books(&catalog, &BookQuery::new("shared").with_category("Picked"));
        assert_eq!(ids(&result.items), vec!["s"]);
        assert_eq!(result.applied_category.as_deref(), Some("Picked"));
    }

    #[test]
    fn unknown_category_falls_back_to_full_catalog() {
        let catalog = Catalog::new(
            vec![book("a", "A", "x", "1"), book("b", "B", "x", "1")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .expect("valid catalog");
        let result = filter_books(&catalog, &BookQuery::new("").with_category("Missing"));
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.applied_category, None);
    }

    #[test]
    fn query_matches_author_only() {
        let catalog = Catalog::new(
            vec![
                book("t", "The Sealed Nectar", "Safiur Rahman Mubarakpuri", "4.7"),
                book("k", "Tafsir Ibn Kathir", "Ibn Kathir", "4.9"),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .expect("valid catalog");
        let result = filter_books(&catalog, &BookQuery::new("mubarak"));
        assert_eq!(ids(&result.items), vec!["t"]);
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let catalog = Catalog::empty();
        for sort in SortMode::ALL {
            let result = filter_books(&catalog, &BookQuery::new("anything").with_sort(sort));
            assert!(result.items.is_empty());
        }
    }

    #[test]
    fn folding_ignores_word_position() {
        assert!(fold_case("ΑΣΑ").contains(&fold_case("ΑΣ")));
        assert_eq!(fold_case("İslam"), "i\u{307}slam");
    }
}
