//! Shared helpers.

pub mod persistence;

pub use persistence::*;

/// Current Unix time in milliseconds.
///
/// Mutating APIs take an explicit `now_ms` so tests control the clock;
/// hosts stamp real time with this.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
