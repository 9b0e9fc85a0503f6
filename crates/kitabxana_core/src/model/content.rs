//! Catalog content records.
//!
//! # Responsibility
//! - Define the immutable entities the app ships with (books, hadiths, ayahs).
//! - Provide the closed set of content kinds used to key bookmarks and sessions.
//!
//! # Invariants
//! - Records are never mutated after catalog construction.
//! - `id` is unique within one `ContentKind`.

use crate::model::color::DisplayColor;
use serde::{Deserialize, Serialize};

/// Opaque identifier for any catalog entity.
pub type EntityId = String;

/// Kind of catalog entity a bookmark or session refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Book,
    Hadith,
    Ayah,
}

impl ContentKind {
    /// All kinds, in display order.
    pub const ALL: [ContentKind; 3] = [Self::Book, Self::Hadith, Self::Ayah];

    /// Stable storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Hadith => "hadith",
            Self::Ayah => "ayah",
        }
    }

    /// Parses a storage/wire name. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "book" => Some(Self::Book),
            "hadith" => Some(Self::Hadith),
            "ayah" => Some(Self::Ayah),
            _ => None,
        }
    }
}

/// A book in the library catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: EntityId,
    pub title: String,
    pub author: String,
    /// Decimal text as shipped, e.g. `"4.8"`. See [`Book::rating_value`].
    pub rating: String,
    /// Asset name of the cover image.
    pub thumbnail: String,
    pub color: DisplayColor,
    pub description: String,
}

impl Book {
    /// Numeric rating used for sorting.
    ///
    /// Unparseable or non-finite ratings count as `0.0`.
    pub fn rating_value(&self) -> f64 {
        parse_rating(&self.rating)
    }
}

pub(crate) fn parse_rating(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// A single hadith with its narrator and collection label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hadith {
    pub id: EntityId,
    pub text: String,
    pub narrator: String,
    pub source: String,
}

/// A Qur'an verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ayah {
    pub id: EntityId,
    pub text: String,
    pub surah: String,
    /// 1-based verse number within `surah`.
    pub verse: u32,
}

#[cfg(test)]
mod tests {
    use super::{parse_rating, ContentKind};

    #[test]
    fn content_kind_round_trips_storage_names() {
        for kind in ContentKind::ALL {
            assert_eq!(ContentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ContentKind::parse("Book"), None);
        assert_eq!(ContentKind::parse(""), None);
    }

    #[test]
    fn rating_parse_falls_back_to_zero() {
        assert_eq!(parse_rating("4.8"), 4.8);
        assert_eq!(parse_rating(" 4.7 "), 4.7);
        assert_eq!(parse_rating("bad"), 0.0);
        assert_eq!(parse_rating(""), 0.0);
        assert_eq!(parse_rating("NaN"), 0.0);
        assert_eq!(parse_rating("inf"), 0.0);
    }
}
