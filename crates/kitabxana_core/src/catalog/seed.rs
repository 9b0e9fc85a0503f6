//! Seed document decoding.
//!
//! The seed is a JSON document with `books`, `hadiths`, `ayahs` and
//! `categories`. Categories list book ids; every listed id must be defined in
//! `books`.

use super::{Catalog, CatalogError, CatalogResult, Category};
use crate::model::color::DisplayColor;
use crate::model::content::{Ayah, Book, ContentKind, EntityId, Hadith};
use serde::Deserialize;
use uuid::Uuid;

/// Sample library shipped inside the binary.
pub const BUILTIN_SEED_JSON: &str = include_str!("seed.json");

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    books: Vec<SeedBook>,
    #[serde(default)]
    hadiths: Vec<SeedHadith>,
    #[serde(default)]
    ayahs: Vec<SeedAyah>,
    #[serde(default)]
    categories: Vec<SeedCategory>,
}

#[derive(Debug, Deserialize)]
struct SeedBook {
    #[serde(default)]
    id: Option<String>,
    title: String,
    author: String,
    rating: String,
    #[serde(default)]
    thumbnail: String,
    color: DisplayColor,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct SeedHadith {
    #[serde(default)]
    id: Option<String>,
    text: String,
    narrator: String,
    source: String,
}

#[derive(Debug, Deserialize)]
struct SeedAyah {
    #[serde(default)]
    id: Option<String>,
    text: String,
    surah: String,
    verse: u32,
}

#[derive(Debug, Deserialize)]
struct SeedCategory {
    name: String,
    #[serde(default)]
    book_ids: Vec<String>,
}

/// Derives a stable id for an entity that ships without one.
///
/// The same `(kind, natural_key)` always yields the same id.
pub fn derive_entity_id(kind: ContentKind, natural_key: &str) -> EntityId {
    let name = format!("kitabxana:{}:{natural_key}", kind.as_str());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

pub(super) fn parse_seed(json: &str) -> CatalogResult<Catalog> {
    let document: SeedDocument = serde_json::from_str(json)?;

    let books = document
        .books
        .into_iter()
        .map(|seed| Book {
            id: seed.id.unwrap_or_else(|| {
                derive_entity_id(ContentKind::Book, &format!("{}|{}", seed.title, seed.author))
            }),
            title: seed.title,
            author: seed.author,
            rating: seed.rating,
            thumbnail: seed.thumbnail,
            color: seed.color,
            description: seed.description,
        })
        .collect::<Vec<_>>();

    let hadiths = document
        .hadiths
        .into_iter()
        .map(|seed| Hadith {
            id: seed
                .id
                .unwrap_or_else(|| derive_entity_id(ContentKind::Hadith, &seed.text)),
            text: seed.text,
            narrator: seed.narrator,
            source: seed.source,
        })
        .collect::<Vec<_>>();

    let ayahs = document
        .ayahs
        .into_iter()
        .map(|seed| Ayah {
            id: seed.id.unwrap_or_else(|| {
                derive_entity_id(ContentKind::Ayah, &format!("{}|{}", seed.surah, seed.verse))
            }),
            text: seed.text,
            surah: seed.surah,
            verse: seed.verse,
        })
        .collect::<Vec<_>>();

    let mut categories = Vec::with_capacity(document.categories.len());
    for seed in document.categories {
        let mut members = Vec::with_capacity(seed.book_ids.len());
        for book_id in seed.book_ids {
            let Some(book) = books.iter().find(|book| book.id == book_id) else {
                return Err(CatalogError::UnknownCategoryBook {
                    category: seed.name,
                    book_id,
                });
            };
            members.push(book.clone());
        }
        categories.push(Category::new(seed.name, members));
    }

    Catalog::new(books, hadiths, ayahs, categories)
}

#[cfg(test)]
mod tests {
    use super::{derive_entity_id, parse_seed};
    use crate::catalog::CatalogError;
    use crate::model::content::ContentKind;

    #[test]
    fn derived_ids_are_stable_and_kind_scoped() {
        let first = derive_entity_id(ContentKind::Hadith, "text");
        let second = derive_entity_id(ContentKind::Hadith, "text");
        let other_kind = derive_entity_id(ContentKind::Ayah, "text");
        assert_eq!(first, second);
        assert_ne!(first, other_kind);
    }

    #[test]
    fn missing_ids_are_derived() {
        let catalog = parse_seed(
            r#"{
                "hadiths": [{"text": "t", "narrator": "n", "source": "s"}],
                "ayahs": [{"text": "a", "surah": "Ibrahim", "verse": 1}]
            }"#,
        )
        .expect("valid seed");
        assert_eq!(
            catalog.hadiths()[0].id,
            derive_entity_id(ContentKind::Hadith, "t")
        );
        assert_eq!(
            catalog.ayahs()[0].id,
            derive_entity_id(ContentKind::Ayah, "Ibrahim|1")
        );
    }

    #[test]
    fn category_with_unknown_book_is_rejected() {
        let err = parse_seed(
            r#"{
                "books": [{"id": "a", "title": "A", "author": "X", "rating": "1", "color": "red"}],
                "categories": [{"name": "C", "book_ids": ["a", "missing"]}]
            }"#,
        )
        .expect_err("unknown book id must fail");
        assert!(matches!(
            err,
            CatalogError::UnknownCategoryBook { ref book_id, .. } if book_id == "missing"
        ));
    }

    #[test]
    fn invalid_color_is_a_seed_error() {
        let err = parse_seed(
            r#"{"books": [{"title": "A", "author": "X", "rating": "1", "color": "plaid"}]}"#,
        )
        .expect_err("bad color must fail");
        assert!(matches!(err, CatalogError::InvalidSeed(_)));
    }
}
