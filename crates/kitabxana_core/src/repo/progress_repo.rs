//! Reading progress repository.
//!
//! Stores one `SessionSnapshot` per content kind. Progress itself is not
//! stored; it is recomputed from the selection on restore.

use super::{RepoError, RepoResult};
use crate::model::content::ContentKind;
use crate::model::session::SessionSnapshot;
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for reading progress persistence.
pub trait ProgressRepository {
    fn load(&self, kind: ContentKind) -> RepoResult<Option<SessionSnapshot>>;
    fn save(&self, kind: ContentKind, snapshot: &SessionSnapshot) -> RepoResult<()>;
}

/// SQLite-backed progress repository.
pub struct SqliteProgressRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProgressRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProgressRepository for SqliteProgressRepository<'_> {
    fn load(&self, kind: ContentKind) -> RepoResult<Option<SessionSnapshot>> {
        let row = self
            .conn
            .query_row(
                "SELECT selected_id, elapsed_seconds FROM reading_progress WHERE kind = ?1;",
                [kind.as_str()],
                |row| Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        let Some((selected_id, elapsed)) = row else {
            return Ok(None);
        };
        let elapsed_seconds = u64::try_from(elapsed).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid elapsed_seconds `{elapsed}` in reading_progress.elapsed_seconds"
            ))
        })?;

        Ok(Some(SessionSnapshot {
            selected_id,
            elapsed_seconds,
        }))
    }

    fn save(&self, kind: ContentKind, snapshot: &SessionSnapshot) -> RepoResult<()> {
        let elapsed = i64::try_from(snapshot.elapsed_seconds).map_err(|_| {
            RepoError::InvalidData(format!(
                "elapsed_seconds `{}` exceeds storable range",
                snapshot.elapsed_seconds
            ))
        })?;

        self.conn.execute(
            "INSERT INTO reading_progress (kind, selected_id, elapsed_seconds)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(kind) DO UPDATE SET
                selected_id = excluded.selected_id,
                elapsed_seconds = excluded.elapsed_seconds,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![kind.as_str(), snapshot.selected_id.as_deref(), elapsed],
        )?;
        Ok(())
    }
}
