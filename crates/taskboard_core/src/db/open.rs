//! Connection bootstrap for the relational store.
//!
//! # Invariants
//! - Returned connections have a busy timeout so concurrent short-lived
//!   connections wait instead of failing with `SQLITE_BUSY`.
//! - Returned connections have `foreign_keys=OFF`: deleting a user must not
//!   fail because work items still reference it. Bundled SQLite builds may
//!   default to enforcement, so the pragma is always set explicitly.

use super::DbResult;
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file for a single store operation.
///
/// The file is created when missing. Schema is not touched here; callers run
/// [`super::migrations::apply_migrations`] through store initialization.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error path={} duration_ms={} error_code=db_open_failed error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    if let Err(err) = configure_connection(&conn) {
        error!(
            "event=db_open module=db status=error path={} duration_ms={} error_code=db_configure_failed error={}",
            path.display(),
            started_at.elapsed().as_millis(),
            err
        );
        return Err(err.into());
    }

    debug!(
        "event=db_open module=db status=ok path={} duration_ms={}",
        path.display(),
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.pragma_update(None, "foreign_keys", false)
}
