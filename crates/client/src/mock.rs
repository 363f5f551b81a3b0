//! Scripted driver for exercising the client machinery in tests
//!
//! Failure budgets ("fail the next N opens/pings/...") are decremented as
//! they are consumed, so a test can script two transient failures followed
//! by success and then assert exact call counts.

use crate::driver::Driver;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Failure produced by a scripted budget
#[derive(Debug)]
pub struct MockError(pub String);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for MockError {}

/// Call counters shared between a driver and the test observing it
#[derive(Default)]
pub struct Counters {
    opens: AtomicU32,
    pings: AtomicU32,
    closes: AtomicU32,
    commits: AtomicU32,
    rollbacks: AtomicU32,
}

impl Counters {
    pub fn opens(&self) -> u32 {
        self.opens.load(Ordering::SeqCst)
    }
    pub fn pings(&self) -> u32 {
        self.pings.load(Ordering::SeqCst)
    }
    pub fn closes(&self) -> u32 {
        self.closes.load(Ordering::SeqCst)
    }
    pub fn commits(&self) -> u32 {
        self.commits.load(Ordering::SeqCst)
    }
    pub fn rollbacks(&self) -> u32 {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

/// Opaque stand-in for a live transport handle
#[derive(Debug)]
pub struct MockConn;

/// Driver whose failures are scripted per entry point
pub struct MockDriver {
    counters: Arc<Counters>,
    fail_opens: AtomicU32,
    fail_pings: AtomicU32,
    fail_commits: AtomicU32,
    fail_rollbacks: AtomicU32,
    fail_closes: AtomicU32,
}

impl MockDriver {
    /// A driver that never fails until told otherwise
    pub fn reliable() -> Self {
        MockDriver {
            counters: Arc::new(Counters::default()),
            fail_opens: AtomicU32::new(0),
            fail_pings: AtomicU32::new(0),
            fail_commits: AtomicU32::new(0),
            fail_rollbacks: AtomicU32::new(0),
            fail_closes: AtomicU32::new(0),
        }
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    pub fn fail_next_opens(&self, n: u32) {
        self.fail_opens.store(n, Ordering::SeqCst);
    }
    pub fn fail_next_pings(&self, n: u32) {
        self.fail_pings.store(n, Ordering::SeqCst);
    }
    pub fn fail_next_commits(&self, n: u32) {
        self.fail_commits.store(n, Ordering::SeqCst);
    }
    pub fn fail_next_rollbacks(&self, n: u32) {
        self.fail_rollbacks.store(n, Ordering::SeqCst);
    }
    pub fn fail_next_closes(&self, n: u32) {
        self.fail_closes.store(n, Ordering::SeqCst);
    }

    fn consume(budget: &AtomicU32) -> bool {
        let mut current = budget.load(Ordering::SeqCst);
        while current > 0 {
            match budget.compare_exchange(
                current,
                current - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
        false
    }
}

impl Driver for MockDriver {
    type Conn = MockConn;
    type Error = MockError;

    fn open(&self) -> Result<MockConn, MockError> {
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_opens) {
            return Err(MockError("scripted open failure".to_string()));
        }
        Ok(MockConn)
    }

    fn ping(&self, _conn: &mut MockConn) -> Result<(), MockError> {
        self.counters.pings.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_pings) {
            return Err(MockError("scripted ping failure".to_string()));
        }
        Ok(())
    }

    fn commit(&self, _conn: &mut MockConn) -> Result<(), MockError> {
        self.counters.commits.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_commits) {
            return Err(MockError("scripted commit failure".to_string()));
        }
        Ok(())
    }

    fn rollback(&self, _conn: &mut MockConn) -> Result<(), MockError> {
        self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_rollbacks) {
            return Err(MockError("scripted rollback failure".to_string()));
        }
        Ok(())
    }

    fn close(&self, _conn: MockConn) -> Result<(), MockError> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_closes) {
            return Err(MockError("scripted close failure".to_string()));
        }
        Ok(())
    }
}
