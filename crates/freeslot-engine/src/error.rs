//! Error types for freeslot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// Date normalization left the supported year range or did not settle
    /// within the iteration budget.
    #[error("Date arithmetic out of range: {date} {delta:+} days")]
    ArithmeticRange { date: String, delta: i64 },

    #[error("Busy span from {start} to {end} exceeds {max_days} days")]
    SpanTooLong {
        start: String,
        end: String,
        max_days: i64,
    },

    #[error("Invalid minute of day: {0} (expected 0..=1440)")]
    InvalidMinute(u32),

    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: u16, end: u16 },

    #[error("Invalid date range: {from} is after {to}")]
    InvalidRange { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
