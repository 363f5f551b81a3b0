//! Tenax - resilient synchronous clients for relational and key-value stores
//!
//! One client instance owns one physical connection behind one lock and runs
//! every operation through the same discipline: validate the connection,
//! time the work, flag it when slow, and retry transient failures with
//! exponential backoff and automatic reconnection. Typed facades for SQL and
//! Redis-style stores are thin sugar over that core.
//!
//! # Quick Start
//!
//! ```ignore
//! use tenax::{SqlClient, SqlConfig, SqlValue};
//!
//! let db = SqlClient::connect(SqlConfig::file("app.db"))?;
//!
//! db.mutate(
//!     "INSERT INTO users (name) VALUES (?)",
//!     &[SqlValue::from("alice")],
//! )?;
//! let user = db.get_one("SELECT * FROM users WHERE name = ?", &["alice".into()])?;
//! ```
//!
//! # Architecture
//!
//! The resilience machinery lives in [`Client`], generic over a [`Driver`]
//! that supplies the physical connection handle. `SqlClient` and `KvClient`
//! wrap it for their backends; neither adds resilience logic of its own.

// Re-export the public API from the backend crates
pub use tenax_core::{
    backoff, slowlog, ClientOptions, DriverFailure, Error, Result, SlowOp, MAX_LABEL_LEN,
};

pub use tenax_client::{Client, ConnectionManager, Driver};

pub use tenax_sql::{
    FieldDescriptor, InsertOutcome, KeyRole, Row, SqlClient, SqlConfig, SqlValue, SqliteDriver,
    TableInfo, DEFAULT_CHUNK_SIZE,
};

pub use tenax_kv::{KvClient, KvConfig, RedisDriver};
