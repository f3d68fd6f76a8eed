//! Error types for the SQLite populator.

use thiserror::Error;

/// Errors that can occur during SQLite population.
#[derive(Error, Debug)]
pub enum SqlitePopulatorError {
    /// SQLite connection or query error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An `id` column held a value that cannot be used as a reference.
    #[error("Table '{table}' has a {kind} id, expected integer or text")]
    UnsupportedReference { table: String, kind: &'static str },
}
