//! Database schema definitions and initialization.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::debug;

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates all tables. Idempotent.
///
/// # Tables
///
/// - `kv_store`: string values keyed by storage key
///
/// # Errors
///
/// Returns `DatabaseError::Custom` if the file was written by a newer schema
/// version, or any SQLite error from the DDL.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    let existing = schema_version(conn)?;
    if existing > SCHEMA_VERSION {
        return Err(DatabaseError::Custom(format!(
            "schema version {} is newer than supported version {}",
            existing, SCHEMA_VERSION
        ))
        .into());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)
        .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Reads the schema version recorded in the database.
pub fn schema_version(conn: &Connection) -> AppResult<i32> {
    let version = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(version)
}
