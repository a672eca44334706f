// Database connection management
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::migrations::run_migrations;
use crate::error::{OrderError, OrderResult};

/// Handle to the orders database.
///
/// Holds only the location; every operation opens its own connection with
/// [`Database::connect`] and the connection is closed when it is dropped.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection and make sure the orders table exists
    pub fn connect(&self) -> OrderResult<Connection> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| OrderError::Connection(e.to_string()))?;
            }
        }

        let conn = Connection::open(&self.path)
            .map_err(|e| OrderError::Connection(e.to_string()))?;

        run_migrations(&conn).map_err(|e| OrderError::Connection(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "opened database connection");
        Ok(conn)
    }
}
