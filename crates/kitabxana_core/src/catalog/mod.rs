//! Read-only content catalog.
//!
//! # Responsibility
//! - Own the ordered books, hadiths and ayahs the app ships with.
//! - Own named book categories used for browsing.
//! - Answer id lookups, positions and bookmark resolution.
//!
//! # Invariants
//! - Ids are unique per `ContentKind`; construction rejects duplicates.
//! - Entity order is fixed at construction and never changes.
//! - A catalog is immutable once built and can be shared by reference (`Arc`).

mod seed;

use crate::model::content::{Ayah, Book, ContentKind, EntityId, Hadith};
use log::info;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use seed::{derive_entity_id, BUILTIN_SEED_JSON};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog construction error.
#[derive(Debug)]
pub enum CatalogError {
    /// Seed document is not valid JSON or has the wrong shape.
    InvalidSeed(serde_json::Error),
    DuplicateId { kind: ContentKind, id: EntityId },
    DuplicateCategory(String),
    /// A seed category lists a book id the seed does not define.
    UnknownCategoryBook { category: String, book_id: EntityId },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSeed(err) => write!(f, "invalid catalog seed: {err}"),
            Self::DuplicateId { kind, id } => {
                write!(f, "duplicate {} id in catalog: {id}", kind.as_str())
            }
            Self::DuplicateCategory(name) => write!(f, "duplicate category: {name}"),
            Self::UnknownCategoryBook { category, book_id } => {
                write!(f, "category `{category}` references unknown book `{book_id}`")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSeed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidSeed(value)
    }
}

/// Named browsing group owning its own ordered book list.
///
/// The same book may appear in several categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub books: Vec<Book>,
}

impl Category {
    pub fn new(name: impl Into<String>, books: Vec<Book>) -> Self {
        Self {
            name: name.into(),
            books,
        }
    }
}

/// Fixed in-memory collection of all content.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
    hadiths: Vec<Hadith>,
    ayahs: Vec<Ayah>,
    categories: BTreeMap<String, Category>,
}

impl Catalog {
    /// Builds a catalog after checking id and category-name uniqueness.
    pub fn new(
        books: Vec<Book>,
        hadiths: Vec<Hadith>,
        ayahs: Vec<Ayah>,
        categories: Vec<Category>,
    ) -> CatalogResult<Self> {
        ensure_unique_ids(ContentKind::Book, books.iter().map(|book| book.id.as_str()))?;
        ensure_unique_ids(
            ContentKind::Hadith,
            hadiths.iter().map(|hadith| hadith.id.as_str()),
        )?;
        ensure_unique_ids(ContentKind::Ayah, ayahs.iter().map(|ayah| ayah.id.as_str()))?;

        let mut by_name = BTreeMap::new();
        for category in categories {
            if by_name.contains_key(&category.name) {
                return Err(CatalogError::DuplicateCategory(category.name));
            }
            by_name.insert(category.name.clone(), category);
        }

        Ok(Self {
            books,
            hadiths,
            ayahs,
            categories: by_name,
        })
    }

    /// Catalog with no content. Every query on it yields empty results.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the sample library bundled with the app.
    pub fn builtin() -> CatalogResult<Self> {
        let catalog = Self::from_json(BUILTIN_SEED_JSON)?;
        info!(
            "event=catalog_load module=catalog status=ok source=builtin books={} hadiths={} ayahs={} categories={}",
            catalog.books.len(),
            catalog.hadiths.len(),
            catalog.ayahs.len(),
            catalog.categories.len()
        );
        Ok(catalog)
    }

    /// Loads a catalog from a seed JSON document.
    ///
    /// Entries without an `id` get one derived from their natural key, so ids
    /// stay stable across launches.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        seed::parse_seed(json)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn hadiths(&self) -> &[Hadith] {
        &self.hadiths
    }

    pub fn ayahs(&self) -> &[Ayah] {
        &self.ayahs
    }

    /// Number of entities of `kind`.
    pub fn len(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Book => self.books.len(),
            ContentKind::Hadith => self.hadiths.len(),
            ContentKind::Ayah => self.ayahs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.hadiths.is_empty() && self.ayahs.is_empty()
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn hadith(&self, id: &str) -> Option<&Hadith> {
        self.hadiths.iter().find(|hadith| hadith.id == id)
    }

    pub fn ayah(&self, id: &str) -> Option<&Ayah> {
        self.ayahs.iter().find(|ayah| ayah.id == id)
    }

    /// 0-based position of `id` in its ordered catalog.
    pub fn position(&self, kind: ContentKind, id: &str) -> Option<usize> {
        match kind {
            ContentKind::Book => self.books.iter().position(|book| book.id == id),
            ContentKind::Hadith => self.hadiths.iter().position(|hadith| hadith.id == id),
            ContentKind::Ayah => self.ayahs.iter().position(|ayah| ayah.id == id),
        }
    }

    /// 1-based number shown next to an entity in reader lists.
    pub fn display_number(&self, kind: ContentKind, id: &str) -> Option<usize> {
        self.position(kind, id).map(|index| index + 1)
    }

    pub fn contains(&self, kind: ContentKind, id: &str) -> bool {
        self.position(kind, id).is_some()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Categories in ascending name order, including empty ones.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Category names for the browse screen: ascending, empty categories omitted.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories
            .values()
            .filter(|category| !category.books.is_empty())
            .map(|category| category.name.as_str())
            .collect()
    }

    /// Books whose ids are in `ids`, in catalog order. Stale ids are skipped.
    pub fn resolve_books(&self, ids: &BTreeSet<EntityId>) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|book| ids.contains(&book.id))
            .collect()
    }

    /// Hadiths whose ids are in `ids`, in catalog order. Stale ids are skipped.
    pub fn resolve_hadiths(&self, ids: &BTreeSet<EntityId>) -> Vec<&Hadith> {
        self.hadiths
            .iter()
            .filter(|hadith| ids.contains(&hadith.id))
            .collect()
    }

    /// Ayahs whose ids are in `ids`, in catalog order. Stale ids are skipped.
    pub fn resolve_ayahs(&self, ids: &BTreeSet<EntityId>) -> Vec<&Ayah> {
        self.ayahs
            .iter()
            .filter(|ayah| ids.contains(&ayah.id))
            .collect()
    }
}

fn ensure_unique_ids<'a>(
    kind: ContentKind,
    ids: impl Iterator<Item = &'a str>,
) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogError, Category};
    use crate::model::color::DisplayColor;
    use crate::model::content::{Book, ContentKind, Hadith};
    use std::collections::BTreeSet;

    fn book(id: &str, title: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: "author".to_string(),
            rating: "4.0".to_string(),
            thumbnail: String::new(),
            color: DisplayColor::rgb(0, 0, 0),
            description: String::new(),
        }
    }

    fn hadith(id: &str) -> Hadith {
        Hadith {
            id: id.to_string(),
            text: format!("text {id}"),
            narrator: "narrator".to_string(),
            source: "source".to_string(),
        }
    }

    #[test]
    fn rejects_duplicate_ids_within_kind() {
        let err = Catalog::new(
            vec![book("a", "A"), book("a", "B")],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
        .expect_err("duplicate book id must fail");
        assert!(matches!(
            err,
            CatalogError::DuplicateId {
                kind: ContentKind::Book,
                ..
            }
        ));
    }

    #[test]
    fn same_id_across_kinds_is_allowed() {
        let catalog = Catalog::new(vec![book("x", "X")], vec![hadith("x")], Vec::new(), Vec::new())
            .expect("ids only need to be unique per kind");
        assert_eq!(catalog.position(ContentKind::Book, "x"), Some(0));
        assert_eq!(catalog.position(ContentKind::Hadith, "x"), Some(0));
    }

    #[test]
    fn rejects_duplicate_category_names() {
        let err = Catalog::new(
            vec![book("a", "A")],
            Vec::new(),
            Vec::new(),
            vec![
                Category::new("Same", vec![book("a", "A")]),
                Category::new("Same", Vec::new()),
            ],
        )
        .expect_err("duplicate category must fail");
        assert!(matches!(err, CatalogError::DuplicateCategory(name) if name == "Same"));
    }

    #[test]
    fn category_names_are_sorted_and_skip_empty() {
        let catalog = Catalog::new(
            vec![book("a", "A")],
            Vec::new(),
            Vec::new(),
            vec![
                Category::new("Zeta", vec![book("a", "A")]),
                Category::new("Empty", Vec::new()),
                Category::new("Alpha", vec![book("a", "A")]),
            ],
        )
        .expect("valid catalog");
        assert_eq!(catalog.category_names(), vec!["Alpha", "Zeta"]);
        assert_eq!(catalog.categories().count(), 3);
    }

    #[test]
    fn resolve_keeps_catalog_order_and_skips_stale_ids() {
        let catalog = Catalog::new(
            Vec::new(),
            vec![hadith("h1"), hadith("h2"), hadith("h3")],
            Vec::new(),
            Vec::new(),
        )
        .expect("valid catalog");
        let ids = BTreeSet::from(["h3".to_string(), "gone".to_string(), "h1".to_string()]);
        let resolved = catalog
            .resolve_hadiths(&ids)
            .into_iter()
            .map(|hadith| hadith.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(resolved, vec!["h1", "h3"]);
        assert_eq!(catalog.display_number(ContentKind::Hadith, "h2"), Some(2));
        assert_eq!(catalog.display_number(ContentKind::Hadith, "gone"), None);
    }

    #[test]
    fn empty_catalog_answers_queries() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(ContentKind::Ayah), 0);
        assert!(catalog.book("anything").is_none());
        assert!(catalog.category_names().is_empty());
    }
}
