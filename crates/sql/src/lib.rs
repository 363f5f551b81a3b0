//! Relational backend for Tenax
//!
//! [`SqlClient`] wraps the resilient client machinery around a SQLite
//! connection and exposes the typed operation facades: point reads, writes,
//! chunked batch writes, schema introspection, and scoped transactions.
//! Facades are thin - every one of them routes through the retry executor
//! and none touches the connection handle directly.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod driver;
mod schema;
mod value;

pub use client::{InsertOutcome, SqlClient, DEFAULT_CHUNK_SIZE};
pub use driver::{SqlConfig, SqliteDriver};
pub use schema::{FieldDescriptor, KeyRole, TableInfo};
pub use value::{Row, SqlValue};
