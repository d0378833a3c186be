//! Database operations for diary entries.
//!
//! This module provides SQLite storage for entries behind an r2d2 connection
//! pool, and the `EntryStore` trait the rest of the application talks to.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry CRUD operations and the `EntryStore` trait
//!
//! # Example
//!
//! ```no_run
//! use diario::db::{Database, EntryDraft, EntryStore};
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/diario.db"))?;
//! db.initialize_schema()?;
//! let id = db.create(&EntryDraft {
//!     title: Some("Lunes".to_string()),
//!     body: "Empezó la semana.".to_string(),
//!     created_at: "19 Oct 2026, 09:00".to_string(),
//! })?;
//! assert_eq!(db.list_all()?[0].id, id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod schema;

pub use entries::{Entry, EntryDraft, EntryPatch, EntryStore};

use crate::constants::{DATABASE_BUSY_TIMEOUT_MS, DATABASE_POOL_SIZE};
use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database file cannot be opened or is not a SQLite database
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(DATABASE_POOL_SIZE)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: Duration::from_millis(DATABASE_BUSY_TIMEOUT_MS),
            }))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Fail early on files that are not databases
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.execute_batch("PRAGMA schema_version;")
            .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
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

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

/// Per-connection settings applied when the pool hands out a connection.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(self.busy_timeout)
    }
}
