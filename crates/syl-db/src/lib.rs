//! # syl-db
//!
//! libSQL storage for Syllabus course content.
//!
//! - [`schema`]: static table definitions and the idempotent bootstrap
//! - [`upsert`]: the natural-key upsert engine every table write goes through
//! - [`sync`]: applies a loaded `CourseModel` in one transaction
//! - [`cleanup`]: ordered account-data deletes
//!
//! Local files and remote libSQL servers are both supported; any other URL
//! scheme is rejected with [`DatabaseError::NoDriver`].

pub mod cleanup;
pub mod error;
pub mod helpers;
pub mod schema;
pub mod sync;
mod test_support;
pub mod upsert;

pub use cleanup::{CleanupPlan, CleanupStatement};
pub use error::DatabaseError;

use libsql::Builder;
use syl_config::ConnectionParams;
use tracing::debug;

/// Schemes served by a remote libSQL server.
const REMOTE_SCHEMES: &[&str] = &["libsql", "http", "https"];

/// Database handle for course synchronization and cleanup.
pub struct CourseDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl CourseDb {
    /// Open a local database file, or `":memory:"`.
    ///
    /// Does not create tables; call [`CourseDb::apply_schema`] for that.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` if the file cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let connect = |source| DatabaseError::Connect {
            target: path.to_string(),
            source,
        };
        let db = Builder::new_local(path).build().await.map_err(connect)?;
        let conn = db.connect().map_err(connect)?;
        Self::from_parts(db, conn).await
    }

    /// Open a remote libSQL server. `auth_token` may be empty for servers
    /// without authentication.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Connect` if the client cannot be built.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let connect = |source| DatabaseError::Connect {
            target: url.to_string(),
            source,
        };
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await
            .map_err(connect)?;
        let conn = db.connect().map_err(connect)?;
        Self::from_parts(db, conn).await
    }

    /// Open whatever `params` points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoDriver` for schemes other than `file`,
    /// `libsql`, `http` and `https`, and `DatabaseError::Connect` if opening fails.
    pub async fn connect(params: &ConnectionParams) -> Result<Self, DatabaseError> {
        debug!(?params, "connecting");
        if params.is_local() {
            return Self::open_local(&params.database).await;
        }
        if REMOTE_SCHEMES.contains(&params.scheme.as_str()) {
            return Self::open_remote(&params.server_url(), &params.password).await;
        }
        Err(DatabaseError::NoDriver {
            scheme: params.scheme.clone(),
        })
    }

    async fn from_parts(
        db: libsql::Database,
        conn: libsql::Connection,
    ) -> Result<Self, DatabaseError> {
        // Cascades only fire with enforcement on, and it is per-connection.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("PRAGMA foreign_keys: {e}")))?;
        Ok(Self { db, conn })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
