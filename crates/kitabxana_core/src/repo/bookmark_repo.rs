//! Bookmark repository contracts and SQLite implementation.
//!
//! # Invariants
//! - One row per `(kind, entity_id)`.
//! - `replace` swaps a kind's whole set atomically.

use super::{parse_kind_column, RepoResult};
use crate::model::content::{ContentKind, EntityId};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;

/// Repository interface for bookmark persistence.
pub trait BookmarkRepository {
    fn load(&self, kind: ContentKind) -> RepoResult<BTreeSet<EntityId>>;
    /// Every stored bookmark, ordered by kind then id.
    fn load_all(&self) -> RepoResult<Vec<(ContentKind, EntityId)>>;
    fn replace(&self, kind: ContentKind, ids: &BTreeSet<EntityId>) -> RepoResult<()>;
}

/// SQLite-backed bookmark repository.
pub struct SqliteBookmarkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookmarkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookmarkRepository for SqliteBookmarkRepository<'_> {
    fn load(&self, kind: ContentKind) -> RepoResult<BTreeSet<EntityId>> {
        let mut stmt = self.conn.prepare(
            "SELECT entity_id FROM bookmarks WHERE kind = ?1 ORDER BY entity_id ASC;",
        )?;
        let ids = stmt
            .query_map([kind.as_str()], |row| row.get::<_, String>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(ids)
    }

    fn load_all(&self) -> RepoResult<Vec<(ContentKind, EntityId)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT kind, entity_id FROM bookmarks ORDER BY kind ASC, entity_id ASC;")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut bookmarks = Vec::new();
        for row in rows {
            let (kind_text, id) = row?;
            bookmarks.push((parse_kind_column(&kind_text, "bookmarks.kind")?, id));
        }
        Ok(bookmarks)
    }

    fn replace(&self, kind: ContentKind, ids: &BTreeSet<EntityId>) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM bookmarks WHERE kind = ?1;", [kind.as_str()])?;
        for id in ids {
            tx.execute(
                "INSERT INTO bookmarks (kind, entity_id) VALUES (?1, ?2);",
                params![kind.as_str(), id.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
