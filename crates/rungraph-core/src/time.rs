//! Wall-clock boundary.
//!
//! The layout engine works on plain epoch milliseconds passed in by the
//! caller, so results stay deterministic and testable. This helper is the
//! one place a wall clock is read.

use chrono::Utc;

/// Current time as epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
