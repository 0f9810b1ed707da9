//! SQLite-backed persistence.
//!
//! The app keeps its state in a small string key-value table inside a single
//! SQLite file. Connections are pooled via r2d2.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `kv`: Get/set/remove on the key-value table
//!
//! # Example
//!
//! ```no_run
//! use momento::db::{kv, Database};
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/momento.db"))?;
//! let conn = db.get_conn()?;
//! kv::set_value(&conn, "greeting", "hello")?;
//! assert_eq!(kv::get_value(&conn, "greeting")?.as_deref(), Some("hello"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod kv;
pub mod schema;

use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the database file and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema cannot be
    /// created.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);
        let manager = SqliteConnectionManager::file(db_path);
        let db = Self::from_manager(manager, 4)?;
        info!("Database opened successfully");
        Ok(db)
    }

    /// Opens a private in-memory database. Every pooled connection to
    /// `:memory:` is a separate database, so the pool holds exactly one.
    pub fn open_in_memory() -> AppResult<Self> {
        Self::from_manager(SqliteConnectionManager::memory(), 1)
    }

    fn from_manager(manager: SqliteConnectionManager, max_size: u32) -> AppResult<Self> {
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        let db = Database { pool };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Creates tables if they don't exist. Safe to call multiple times.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        debug!("Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_and_connect() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();

        let result: i32 = conn
            .query_row("SELECT 1 + 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(result, 2);
        assert!(db_path.exists());
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open(&db_path).unwrap();
            let conn = db.get_conn().unwrap();
            kv::set_value(&conn, "k", "v").unwrap();
        }

        let db = Database::open(&db_path).unwrap();
        let conn = db.get_conn().unwrap();
        assert_eq!(kv::get_value(&conn, "k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.initialize_schema().unwrap();
        db.initialize_schema().unwrap();
    }
}
