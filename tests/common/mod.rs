//! Shared test harness: a scripted driver for the resilience suites
//!
//! Mirrors a flaky network transport: failure budgets ("fail the next N
//! opens/pings/...") are consumed as the client touches the driver, and
//! counters record every lifecycle call so tests can assert exact attempt
//! and reconnect counts.

#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tenax::Driver;

#[derive(Debug)]
pub struct FlakyError(pub String);

impl fmt::Display for FlakyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for FlakyError {}

#[derive(Default)]
pub struct Counters {
    pub opens: AtomicU32,
    pub pings: AtomicU32,
    pub closes: AtomicU32,
    pub commits: AtomicU32,
    pub rollbacks: AtomicU32,
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

pub struct FlakyConn;

pub struct FlakyDriver {
    counters: Arc<Counters>,
    fail_opens: AtomicU32,
    fail_pings: AtomicU32,
    fail_rollbacks: AtomicU32,
}

impl FlakyDriver {
    pub fn reliable() -> Self {
        FlakyDriver {
            counters: Arc::new(Counters::default()),
            fail_opens: AtomicU32::new(0),
            fail_pings: AtomicU32::new(0),
            fail_rollbacks: AtomicU32::new(0),
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

    pub fn fail_next_rollbacks(&self, n: u32) {
        self.fail_rollbacks.store(n, Ordering::SeqCst);
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

impl Driver for FlakyDriver {
    type Conn = FlakyConn;
    type Error = FlakyError;

    fn open(&self) -> Result<FlakyConn, FlakyError> {
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_opens) {
            return Err(FlakyError("connect refused".to_string()));
        }
        Ok(FlakyConn)
    }

    fn ping(&self, _conn: &mut FlakyConn) -> Result<(), FlakyError> {
        self.counters.pings.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_pings) {
            return Err(FlakyError("ping timed out".to_string()));
        }
        Ok(())
    }

    fn commit(&self, _conn: &mut FlakyConn) -> Result<(), FlakyError> {
        self.counters.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn rollback(&self, _conn: &mut FlakyConn) -> Result<(), FlakyError> {
        self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        if Self::consume(&self.fail_rollbacks) {
            return Err(FlakyError("rollback lost".to_string()));
        }
        Ok(())
    }

    fn close(&self, _conn: FlakyConn) -> Result<(), FlakyError> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Client options tuned so retry tests finish in milliseconds
pub fn fast_options(max_retries: u32) -> tenax::ClientOptions {
    tenax::ClientOptions::new()
        .with_max_retries(max_retries)
        .with_backoff_base(std::time::Duration::from_millis(1))
}
