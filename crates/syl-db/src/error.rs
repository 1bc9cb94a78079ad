//! Database error types for syl-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema bootstrap failed.
    #[error("Schema statement failed: {0}")]
    Schema(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB, wrong key arity).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The connection URL names a store this build cannot talk to.
    #[error(
        "No driver for '{scheme}' databases. Use a file path, file: URL, or a libsql://, http:// or https:// server URL"
    )]
    NoDriver { scheme: String },

    /// Opening the database or its connection failed.
    #[error("Could not connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: libsql::Error,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
