//! Per-client resilience configuration
//!
//! Options are fixed at construction and never change for the lifetime of a
//! client. Endpoint-specific settings (paths, addresses, credentials,
//! transport timeouts) belong to the backend configs; this struct only holds
//! the knobs the retry machinery itself reads.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default total attempts per operation
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default slow-operation threshold
pub const DEFAULT_SLOW_OP_THRESHOLD: Duration = Duration::from_secs(1);

/// Default first backoff delay; doubles on each subsequent attempt
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Resilience knobs shared by every client backend
///
/// ## Defaults
///
/// - `max_retries`: 3 total attempts
/// - `slow_op_threshold`: 1 second
/// - `backoff_base`: 500 ms (0.5 s, 1 s, 2 s, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Total attempts per operation, including the first (minimum 1)
    pub max_retries: u32,
    /// Completed operations slower than this are flagged for diagnostics
    pub slow_op_threshold: Duration,
    /// Delay before the second attempt; doubles per attempt thereafter
    pub backoff_base: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            max_retries: DEFAULT_MAX_RETRIES,
            slow_op_threshold: DEFAULT_SLOW_OP_THRESHOLD,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl ClientOptions {
    /// Create options with the documented defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total attempt budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the slow-operation threshold
    pub fn with_slow_op_threshold(mut self, threshold: Duration) -> Self {
        self.slow_op_threshold = threshold;
        self
    }

    /// Set the first backoff delay
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }
}
