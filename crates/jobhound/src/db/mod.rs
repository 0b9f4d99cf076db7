//! SQLite persistence layer.
//!
//! A [`Database`] is a cheaply clonable handle over one serialized
//! connection. Table access lives in the repo modules; `JobStore`
//! composes them into the application-level contract.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

pub mod activity_repo;
pub mod error;
pub mod job_repo;
pub mod migrations;
pub mod queue_repo;
pub mod search_repo;

pub use error::DatabaseError;

/// Session settings for file-backed databases. WAL keeps readers off
/// the writer's back; the busy timeout rides out short lock contention.
const FILE_PRAGMAS: &str =
    "PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000; PRAGMA foreign_keys=ON;";

const MEMORY_PRAGMAS: &str = "PRAGMA foreign_keys=ON;";

/// Shared handle to the SQLite database.
///
/// SQLite serializes writes anyway, so a `Mutex<Connection>` costs
/// little and keeps the API synchronous.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens the database file, creating its parent directory and the
    /// file itself when missing, and brings the schema up to date.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db = Self::prepare(Connection::open(path)?, FILE_PRAGMAS)?;
        log::info!("database ready at {}", path.display());
        Ok(db)
    }

    /// In-memory database with the full schema. For tests.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Self::prepare(Connection::open_in_memory()?, MEMORY_PRAGMAS)
    }

    fn prepare(conn: Connection, pragmas: &str) -> Result<Self, DatabaseError> {
        conn.execute_batch(pragmas)?;
        migrations::run_all(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with the connection locked.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        let conn = self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)?;
        f(&conn)
    }
}

/// Returns the canonical database path: `~/.jobhound/data/jobhound.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".jobhound").join("data").join("jobhound.db"))
}
