//! Error types for Tenax clients
//!
//! Three failure kinds reach callers: `Connection` (the transport could not
//! be established or validated), `Operation` (the retry budget was exhausted;
//! wraps the last underlying failure), and `InvalidArgument` (a facade call
//! rejected before any I/O). Driver-native error types are reduced to
//! [`DriverFailure`] at the client boundary and never leak.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.

use thiserror::Error;

/// Result type alias for Tenax operations
pub type Result<T> = std::result::Result<T, Error>;

/// A driver-native failure, reduced to its display form
///
/// The concrete error type of the underlying driver stays behind the client
/// boundary; callers only ever see the message it rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DriverFailure(String);

impl DriverFailure {
    /// Capture a driver error
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        DriverFailure(err.to_string())
    }

    /// Capture a failure that is already a message
    pub fn from_message(message: impl Into<String>) -> Self {
        DriverFailure(message.into())
    }

    /// The rendered failure message
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error types surfaced by Tenax clients
#[derive(Debug, Error)]
pub enum Error {
    /// The connection could not be established or validated
    #[error("connection error: {0}")]
    Connection(String),

    /// The retry budget was exhausted; carries the last observed failure
    #[error("operation `{label}` failed after {attempts} attempt(s): {source}")]
    Operation {
        /// Identifying label of the failed operation
        label: String,
        /// Total attempts performed before giving up
        attempts: u32,
        /// The last failure observed across all attempts
        #[source]
        source: DriverFailure,
    },

    /// A facade was called with arguments it cannot act on
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Build a `Connection` error from anything displayable
    pub fn connection(message: impl std::fmt::Display) -> Self {
        Error::Connection(message.to_string())
    }
}
