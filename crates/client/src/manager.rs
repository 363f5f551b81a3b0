//! Connection lifecycle management
//!
//! Owns the one physical handle of a client and guarantees the invariant
//! that no operation is ever dispatched against a handle that is not open
//! and validated.
//!
//! ## Handle protocol
//!
//! ```text
//! Unopened --ensure--> Open          (fresh open)
//! Open     --ensure--> Open          (ping succeeded)
//! Open     --ensure--> Open          (ping failed: quiet close, fresh open)
//! any      --reconnect/close--> Unopened
//! ```
//!
//! A handle whose ping fails is invalid; `ensure` resolves that in place by
//! quietly closing it and opening a fresh one, so callers only ever observe
//! `Unopened` or `Open`. Close errors are always discarded ("quiet close"):
//! teardown must be safe in cleanup paths.

use crate::driver::Driver;
use tenax_core::{Error, Result};
use tracing::debug;

enum Handle<C> {
    Unopened,
    Open(C),
}

/// Holds and validates the single physical connection of a client
///
/// Not synchronized by itself; the owning [`Client`](crate::Client) wraps it
/// in the one mutex that serializes all handle access.
pub struct ConnectionManager<D: Driver> {
    handle: Handle<D::Conn>,
}

impl<D: Driver> ConnectionManager<D> {
    /// Create a manager with no connection established yet
    pub fn new() -> Self {
        ConnectionManager {
            handle: Handle::Unopened,
        }
    }

    /// Whether a handle is currently open (it may still fail its next ping)
    pub fn is_open(&self) -> bool {
        matches!(self.handle, Handle::Open(_))
    }

    /// Guarantee an open, validated handle and return it
    ///
    /// Lazily opens on first use, revalidates an existing handle with a
    /// ping, and reopens in place when the ping fails. Fails with
    /// [`Error::Connection`] when no handle can be established.
    pub fn ensure(&mut self, driver: &D) -> Result<&mut D::Conn> {
        if let Handle::Open(conn) = &mut self.handle {
            match driver.ping(conn) {
                Ok(()) => {}
                Err(err) => {
                    debug!(
                        target: "tenax::client",
                        error = %err,
                        "ping failed, reopening connection"
                    );
                    self.quiet_close(driver);
                }
            }
        }
        if matches!(self.handle, Handle::Unopened) {
            let conn = driver.open().map_err(Error::connection)?;
            self.handle = Handle::Open(conn);
        }
        match &mut self.handle {
            Handle::Open(conn) => Ok(conn),
            Handle::Unopened => Err(Error::connection("connection unavailable")),
        }
    }

    /// The open handle, if any, without validation
    ///
    /// Used by the transaction scope, whose commit/rollback run directly
    /// against the current handle and are never retried.
    pub fn open_handle(&mut self) -> Option<&mut D::Conn> {
        match &mut self.handle {
            Handle::Open(conn) => Some(conn),
            Handle::Unopened => None,
        }
    }

    /// Unconditionally discard the handle
    ///
    /// The next `ensure` recreates it from scratch. Used between retry
    /// attempts after a failure.
    pub fn reconnect(&mut self, driver: &D) {
        self.quiet_close(driver);
    }

    /// Tear down the handle; no-op when already closed
    pub fn close(&mut self, driver: &D) {
        self.quiet_close(driver);
    }

    fn quiet_close(&mut self, driver: &D) {
        if let Handle::Open(conn) = std::mem::replace(&mut self.handle, Handle::Unopened) {
            if let Err(err) = driver.close(conn) {
                debug!(
                    target: "tenax::client",
                    error = %err,
                    "ignoring error from connection close"
                );
            }
        }
    }
}

impl<D: Driver> Default for ConnectionManager<D> {
    fn default() -> Self {
        Self::new()
    }
}
