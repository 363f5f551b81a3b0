//! Core types for Tenax clients
//!
//! This crate defines the foundational pieces shared by every backend:
//! - Error: the two failure kinds callers ever see
//! - ClientOptions: per-client resilience configuration
//! - Backoff schedule: the pure delay law between retry attempts
//! - Slow-operation reporting: the pure threshold check and its record type
//!
//! Nothing here touches a connection. The client machinery lives in
//! `tenax-client`; the typed backends live in `tenax-sql` and `tenax-kv`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backoff;
pub mod error;
pub mod options;
pub mod slowlog;

pub use backoff::delay_for_attempt;
pub use error::{DriverFailure, Error, Result};
pub use options::ClientOptions;
pub use slowlog::{SlowOp, MAX_LABEL_LEN};
