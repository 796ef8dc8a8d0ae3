#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Storage layer for the Global API.
//!
//! All data lives in a single `DuckDB` database: city boundaries (`osm`),
//! point-source observations (`asset`), EDGAR grid cells and their city
//! overlaps, and the datasource catalogue. Everything in this crate is
//! read-only apart from [`schema::create_schema`], which lays down the
//! table contract for local and test databases.
//!
//! Callers never hold a connection across independent operations. Each
//! operation acquires a [`Session`] from the shared [`Store`], issues its
//! queries, and drops the session on every exit path.

pub mod assets;
pub mod boundaries;
pub mod catalogue;
pub mod edgar;
pub mod paths;
pub mod schema;

use std::ops::Deref;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use duckdb::{AccessMode, Config, Connection};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// `DuckDB` query or connection error.
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    /// Filesystem error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be converted into its row type.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Shared handle to the Global API database.
///
/// `duckdb::Connection` is `Send` but not `Sync`, so the root connection is
/// wrapped in a `Mutex`. The lock is only held long enough to clone a new
/// connection onto the same database instance; queries run on the clone
/// without any locking.
pub struct Store {
    root: Mutex<Connection>,
    next_session: AtomicU64,
}

impl Store {
    /// Opens (or creates) a read-write database and ensures the schema exists.
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Io`] if the parent directory cannot be created, or
    /// [`DbError::Database`] if the connection or schema creation fails.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        schema::create_schema(&conn)?;

        Ok(Self::from_connection(conn))
    }

    /// Opens an existing database in read-only mode.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the file cannot be opened.
    pub fn open_read_only(path: &Path) -> Result<Self, DbError> {
        let config = Config::default().access_mode(AccessMode::ReadOnly)?;
        let conn = Connection::open_with_flags(path, config)?;

        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database with the schema in place.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if schema creation fails.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        schema::create_schema(&conn)?;

        Ok(Self::from_connection(conn))
    }

    /// Wraps an already-open connection.
    #[must_use]
    pub const fn from_connection(conn: Connection) -> Self {
        Self {
            root: Mutex::new(conn),
            next_session: AtomicU64::new(1),
        }
    }

    /// Acquires a short-lived session on the shared database.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a new connection cannot be cloned from the root.
    pub fn session(&self) -> Result<Session, DbError> {
        let conn = {
            let root = self.root.lock().unwrap_or_else(PoisonError::into_inner);
            root.try_clone()?
        };
        let id = self.next_session.fetch_add(1, Ordering::Relaxed);
        log::trace!("acquired storage session {id}");

        Ok(Session { conn, id })
    }
}

/// A request-scoped connection. Released when dropped.
pub struct Session {
    conn: Connection,
    id: u64,
}

impl Session {
    /// Sequence number of this session within its [`Store`].
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Deref for Session {
    type Target = Connection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        log::trace!("released storage session {}", self.id);
    }
}
