//! Slow-operation reporting
//!
//! A completed operation whose wall-clock duration exceeds the per-client
//! threshold is flagged with a [`SlowOp`] record. The check is a pure
//! function of (elapsed, threshold, label); emission is the client's job.
//! No state is retained between calls.

use std::time::Duration;

/// Maximum characters of the operation label kept in a diagnostic
pub const MAX_LABEL_LEN: usize = 200;

/// Diagnostic record for one operation that exceeded the threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlowOp {
    /// Measured wall-clock duration of the operation
    pub elapsed: Duration,
    /// Identifying label, truncated to [`MAX_LABEL_LEN`] characters
    pub label: String,
}

impl SlowOp {
    /// Elapsed time in seconds, for human-oriented output
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Flag `label` if `elapsed` exceeds `threshold`
///
/// Returns `None` for operations at or below the threshold.
pub fn check(elapsed: Duration, threshold: Duration, label: &str) -> Option<SlowOp> {
    if elapsed <= threshold {
        return None;
    }
    Some(SlowOp {
        elapsed,
        label: truncate_label(label),
    })
}

/// Truncate a label to [`MAX_LABEL_LEN`] characters
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_LEN {
        label.to_string()
    } else {
        label.chars().take(MAX_LABEL_LEN).collect()
    }
}
