//! Repository layer over the SQLite store.
//!
//! # Responsibility
//! - Define the persistence contracts the services load from and save to.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Multi-row writes commit atomically or not at all.
//! - Read paths reject rows that violate the stored enum domains instead of
//!   masking them, except preference values, which fall back per key.

use crate::db::DbError;
use crate::model::content::ContentKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod bookmark_repo;
pub mod preferences_repo;
pub mod progress_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_kind_column(value: &str, column: &str) -> RepoResult<ContentKind> {
    ContentKind::parse(value)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid content kind `{value}` in {column}")))
}
