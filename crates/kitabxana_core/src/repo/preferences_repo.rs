//! Preferences repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the flat key-value form of `Preferences`.
//!
//! # Invariants
//! - `save` and `reset` rewrite the whole key set in one transaction.
//! - `load` never fails on a bad stored value; that key keeps its default.

use super::RepoResult;
use crate::model::preferences::Preferences;
use log::warn;
use rusqlite::{params, Connection};

/// Repository interface for preference persistence.
pub trait PreferencesRepository {
    /// Returns stored preferences; absent keys take their defaults.
    fn load(&self) -> RepoResult<Preferences>;
    fn save(&self, preferences: &Preferences) -> RepoResult<()>;
    /// Deletes every stored key so the next load yields defaults.
    fn reset(&self) -> RepoResult<()>;
}

/// SQLite-backed preferences repository.
pub struct SqlitePreferencesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferencesRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PreferencesRepository for SqlitePreferencesRepository<'_> {
    fn load(&self) -> RepoResult<Preferences> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value FROM preferences ORDER BY key ASC;")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut preferences = Preferences::default();
        for row in rows {
            let (key, value) = row?;
            if let Err(err) = preferences.apply_entry(&key, &value) {
                warn!("event=preferences_load module=repo status=fallback key={key} error={err}");
            }
        }
        Ok(preferences)
    }

    fn save(&self, preferences: &Preferences) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in preferences.to_entries() {
            tx.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn reset(&self) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM preferences;", [])?;
        tx.commit()?;
        Ok(())
    }
}
