//! Exponential backoff schedule
//!
//! The delay after failed attempt `i` (0-based) is `base * 2^i`: with the
//! default 500 ms base that is 0.5 s, 1 s, 2 s, ... The law is kept as a pure
//! function so it can be tested without sleeping.

use std::time::Duration;

/// Delay to sleep after failed attempt `attempt` (0-based)
///
/// Saturates instead of overflowing for absurd attempt counts; in practice
/// the retry budget bounds `attempt` to single digits.
pub fn delay_for_attempt(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}
