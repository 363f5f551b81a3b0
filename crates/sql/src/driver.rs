//! SQLite driver and endpoint configuration

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;
use tenax_client::Driver;
use tenax_core::ClientOptions;

/// Where the database lives
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Disk(PathBuf),
    Memory,
}

/// Endpoint configuration for the relational backend
///
/// Immutable after the client is constructed. The busy timeout is the
/// transport-level write-contention timeout and is enforced by SQLite
/// itself, not by the retry layer.
#[derive(Debug, Clone)]
pub struct SqlConfig {
    location: Location,
    /// How long SQLite waits on a locked database before failing a statement
    pub busy_timeout: Duration,
    /// Resilience knobs shared with the generic client
    pub options: ClientOptions,
}

impl SqlConfig {
    /// Database stored at `path` on disk
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SqlConfig {
            location: Location::Disk(path.into()),
            busy_timeout: Duration::from_secs(5),
            options: ClientOptions::default(),
        }
    }

    /// Private in-memory database
    ///
    /// Every reconnect opens a fresh, empty database, so this is only
    /// suitable for tests and scratch work.
    pub fn memory() -> Self {
        SqlConfig {
            location: Location::Memory,
            busy_timeout: Duration::from_secs(5),
            options: ClientOptions::default(),
        }
    }

    /// Set the busy timeout
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Set the resilience options
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }
}

/// [`Driver`] implementation over `rusqlite`
///
/// Liveness is validated with `SELECT 1`. Commit and rollback act on an
/// explicitly opened transaction and are no-ops in autocommit mode, where
/// each statement commits itself.
pub struct SqliteDriver {
    config: SqlConfig,
}

impl SqliteDriver {
    /// Create a driver for the given endpoint
    pub fn new(config: SqlConfig) -> Self {
        SqliteDriver { config }
    }

    /// The endpoint configuration
    pub fn config(&self) -> &SqlConfig {
        &self.config
    }
}

impl Driver for SqliteDriver {
    type Conn = Connection;
    type Error = rusqlite::Error;

    fn open(&self) -> Result<Connection, rusqlite::Error> {
        let conn = match &self.config.location {
            Location::Disk(path) => Connection::open(path)?,
            Location::Memory => Connection::open_in_memory()?,
        };
        conn.busy_timeout(self.config.busy_timeout)?;
        Ok(conn)
    }

    fn ping(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.query_row("SELECT 1", [], |_row| Ok(()))
    }

    fn commit(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if conn.is_autocommit() {
            return Ok(());
        }
        conn.execute_batch("COMMIT")
    }

    fn rollback(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if conn.is_autocommit() {
            return Ok(());
        }
        conn.execute_batch("ROLLBACK")
    }

    fn close(&self, conn: Connection) -> Result<(), rusqlite::Error> {
        conn.close().map_err(|(_conn, err)| err)
    }
}
