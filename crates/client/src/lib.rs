//! Resilient single-connection client machinery
//!
//! One [`Client`] owns exactly one physical connection behind one mutex and
//! runs every operation through the same discipline:
//!
//! 1. acquire the lock
//! 2. validate (or lazily establish) the connection
//! 3. time the operation and flag it if slow
//! 4. on failure, force a reconnect, back off exponentially, and retry up to
//!    the configured budget
//!
//! Backends plug in by implementing [`Driver`] - the seam for the physical
//! connection handle - and by building typed facades on [`Client::execute`].
//! Facades carry no resilience logic of their own.
//!
//! This is not a connection pool: access is strictly serialized, and every
//! call blocks the invoking thread for its full duration including backoff
//! sleeps.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod driver;
mod manager;

#[cfg(test)]
pub(crate) mod mock;

pub use client::Client;
pub use driver::Driver;
pub use manager::ConnectionManager;
