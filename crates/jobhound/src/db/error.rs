//! Error type shared by the persistence layer.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while opening the database or touching a table.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The directory holding the database file could not be created.
    #[error("cannot prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A schema migration did not apply cleanly.
    #[error("migration v{version} failed: {reason}")]
    Migration { version: u32, reason: String },

    /// Another holder of the connection panicked mid-query.
    #[error("connection mutex poisoned")]
    LockPoisoned,
}
