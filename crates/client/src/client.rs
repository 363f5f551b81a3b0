//! The resilient client: lock, validate, time, retry
//!
//! Every public operation of every backend funnels through
//! [`Client::execute`]. The client owns the one mutex that serializes handle
//! access; the lock is held for the duration of one attempt (validation
//! included) and released during backoff sleeps so a retrying caller does
//! not starve concurrent ones.

use crate::driver::Driver;
use crate::manager::ConnectionManager;
use parking_lot::Mutex;
use std::thread;
use std::time::Instant;
use tenax_core::{backoff, slowlog, ClientOptions, DriverFailure, Error, Result};
use tracing::warn;

/// Resilient single-connection client
///
/// One instance per logical connection. Shareable across threads; at most
/// one operation executes against the handle at any instant. Construction
/// eagerly establishes the first connection so endpoint and credential
/// problems surface immediately; after [`close`](Client::close) the next
/// operation re-establishes lazily.
pub struct Client<D: Driver> {
    driver: D,
    manager: Mutex<ConnectionManager<D>>,
    options: ClientOptions,
}

impl<D: Driver> std::fmt::Debug for Client<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<D: Driver> Client<D> {
    /// Create a client and establish its first connection
    pub fn connect(driver: D, options: ClientOptions) -> Result<Self> {
        let client = Client {
            driver,
            manager: Mutex::new(ConnectionManager::new()),
            options,
        };
        client.manager.lock().ensure(&client.driver)?;
        Ok(client)
    }

    /// The resilience options this client was built with
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// The backend driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run one operation under the full resilience discipline
    ///
    /// Performs up to `max_retries` total attempts. Each attempt acquires
    /// the client lock, validates the connection (a validation failure
    /// counts as the attempt's failure), times the operation, and flags it
    /// when it exceeds the slow-operation threshold. Between attempts the
    /// handle is discarded and the thread sleeps on the exponential backoff
    /// schedule. A failure that will be retried is logged at warn level; the
    /// final one is not logged separately, it surfaces as the returned error.
    ///
    /// Retry policy: every driver-raised failure is treated as retryable.
    /// This can replay a write whose true outcome is unknown; callers for
    /// whom replay is unacceptable should run with `max_retries = 1`.
    ///
    /// `label` identifies the operation in diagnostics (for SQL backends,
    /// the statement text).
    pub fn execute<T, F>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut(&mut D::Conn) -> std::result::Result<T, D::Error>,
    {
        let attempts = self.options.max_retries.max(1);
        let mut last_failure = None;

        for attempt in 0..attempts {
            let mut manager = self.manager.lock();
            let failure = match manager.ensure(&self.driver) {
                Ok(conn) => {
                    let start = Instant::now();
                    match op(conn) {
                        Ok(value) => {
                            self.report_slow(label, start.elapsed());
                            return Ok(value);
                        }
                        Err(err) => DriverFailure::from_error(&err),
                    }
                }
                Err(err) => DriverFailure::from_message(err.to_string()),
            };

            if attempt + 1 < attempts {
                warn!(
                    target: "tenax::client",
                    label = %slowlog::truncate_label(label),
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    error = %failure,
                    "operation failed, retrying"
                );
                // Drop the dead handle before backing off so concurrent
                // callers reopen instead of reusing it.
                manager.reconnect(&self.driver);
                drop(manager);
                thread::sleep(backoff::delay_for_attempt(
                    self.options.backoff_base,
                    attempt,
                ));
            }
            last_failure = Some(failure);
        }

        Err(Error::Operation {
            label: label.to_string(),
            attempts,
            source: last_failure
                .unwrap_or_else(|| DriverFailure::from_message("no failure recorded")),
        })
    }

    /// Run `body` as one transaction: commit on `Ok`, roll back on `Err`
    ///
    /// The scope holds no lock across the body; operations issued inside it
    /// serialize through the client lock as usual, which also keeps two
    /// scopes on the same client from interleaving handle access. Commit and
    /// rollback are not retried - they run directly against the current
    /// handle, which the body's own (validated) operations left open. A
    /// rollback failure is logged but never replaces the body's error.
    pub fn with_transaction<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        match body(self) {
            Ok(value) => {
                self.commit_current()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback_current() {
                    warn!(
                        target: "tenax::client",
                        error = %rollback_err,
                        "rollback failed after aborted transaction"
                    );
                }
                Err(err)
            }
        }
    }

    /// Tear down the connection; safe to call any number of times
    ///
    /// The next operation after a close transparently re-establishes.
    pub fn close(&self) {
        self.manager.lock().close(&self.driver);
    }

    /// Whether a handle is currently open
    pub fn is_open(&self) -> bool {
        self.manager.lock().is_open()
    }

    fn commit_current(&self) -> Result<()> {
        let mut manager = self.manager.lock();
        match manager.open_handle() {
            Some(conn) => self.driver.commit(conn).map_err(|err| Error::Operation {
                label: "COMMIT".to_string(),
                attempts: 1,
                source: DriverFailure::from_error(&err),
            }),
            None => Err(Error::connection("no open connection to commit")),
        }
    }

    fn rollback_current(&self) -> Result<()> {
        let mut manager = self.manager.lock();
        match manager.open_handle() {
            // Nothing open means nothing to discard.
            None => Ok(()),
            Some(conn) => self.driver.rollback(conn).map_err(|err| Error::Operation {
                label: "ROLLBACK".to_string(),
                attempts: 1,
                source: DriverFailure::from_error(&err),
            }),
        }
    }

    fn report_slow(&self, label: &str, elapsed: std::time::Duration) {
        if let Some(slow) = slowlog::check(elapsed, self.options.slow_op_threshold, label) {
            warn!(
                target: "tenax::slow",
                label = %slow.label,
                elapsed_secs = slow.elapsed_secs(),
                "slow operation"
            );
        }
    }
}
