//! Connection bootstrap.
//!
//! # Invariants
//! - Returned connections have a busy timeout and all migrations applied.
//! - Every open attempt emits one `db_open` start event and one ok/error event.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) a database file and migrates it.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory database and migrates it.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = match connect() {
        Ok(mut conn) => bootstrap_connection(&mut conn)
            .map(|()| conn)
            .map_err(|err| ("db_bootstrap_failed", err)),
        Err(err) => Err(("db_open_failed", DbError::from(err))),
    };

    match result {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err((error_code, err)) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code={error_code} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)
}

#[cfg(test)]
mod tests {
    use super::{open_db, open_db_in_memory};
    use crate::db::migrations::{current_version, latest_version};
    use crate::db::DbError;

    #[test]
    fn in_memory_database_is_fully_migrated() {
        let conn = open_db_in_memory().expect("in-memory db opens");
        assert_eq!(
            current_version(&conn).expect("version readable"),
            latest_version()
        );
    }

    #[test]
    fn reopening_a_file_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("kitabxana.sqlite3");
        drop(open_db(&path).expect("first open"));
        let conn = open_db(&path).expect("second open");
        assert_eq!(
            current_version(&conn).expect("version readable"),
            latest_version()
        );
    }

    #[test]
    fn newer_schema_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("future.sqlite3");
        {
            let conn = rusqlite::Connection::open(&path).expect("raw open");
            conn.pragma_update(None, "user_version", latest_version() + 1)
                .expect("set version");
        }

        let err = open_db(&path).expect_err("future schema must fail");
        assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
        assert_eq!(
            err.to_string(),
            format!(
                "library database was written by a newer app (schema v{}); this build reads up to v{}",
                latest_version() + 1,
                latest_version()
            )
        );
    }
}
