//! Key-value operations on `kv_store`.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Returns the value stored under `key`, if any.
pub fn get_value(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    debug!("Reading key {}", key);

    let value = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;
    Ok(value)
}

/// Inserts or replaces the value under `key`.
pub fn set_value(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    debug!("Writing key {} ({} bytes)", key, value.len());

    conn.execute(
        r#"
        INSERT INTO kv_store (key, value, updated_at)
        VALUES (?1, ?2, CURRENT_TIMESTAMP)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = CURRENT_TIMESTAMP
        "#,
        params![key, value],
    )
    .map_err(DatabaseError::Sqlite)?;
    Ok(())
}

/// Deletes `key`. Returns whether a row was removed.
pub fn remove_value(conn: &Connection, key: &str) -> AppResult<bool> {
    debug!("Removing key {}", key);

    let removed = conn
        .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
        .map_err(DatabaseError::Sqlite)?;
    Ok(removed > 0)
}
