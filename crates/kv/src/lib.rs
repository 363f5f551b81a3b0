//! Key-value backend for Tenax
//!
//! [`KvClient`] wraps the resilient client machinery around one synchronous
//! Redis connection and exposes Redis-familiar facades for keys, strings,
//! hashes, lists, sets, and sorted sets. Every facade is one retried unit of
//! work through the retry executor; none of them touches the connection
//! handle directly. Redis commands autocommit, so the generic transaction
//! scope is not surfaced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;
mod driver;

#[cfg(test)]
pub(crate) mod mock;

pub use client::KvClient;
pub use config::KvConfig;
pub use driver::RedisDriver;
