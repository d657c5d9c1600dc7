//! # freeslot-engine
//!
//! Find the time when every calendar is free.
//!
//! Busy spans from any number of calendars are merged into one busy set,
//! split into per-day intervals, merged per day, and complemented into free
//! slots inside a configurable daily window. Dates are plain proleptic
//! Gregorian dates with minute precision and no time zones.
//!
//! ## Quick start
//!
//! ```rust
//! use freeslot_engine::{find_free_slots, BusySpan, CalendarDate, WindowConfig};
//!
//! let day = CalendarDate::new(2024, 1, 1).unwrap();
//! let meeting = BusySpan::new(day, 9 * 60, day, 10 * 60).unwrap();
//!
//! let slots = find_free_slots([meeting], &WindowConfig::default(), None).unwrap();
//! let spans: Vec<_> = slots.iter().map(|s| (s.start_minute, s.end_minute)).collect();
//! assert_eq!(spans, vec![(0, 540), (600, 1440)]);
//! ```
//!
//! ## Modules
//!
//! - [`calendar`] — leap years, month lengths, date normalization, day keys
//! - [`span`] — busy span → per-day busy intervals
//! - [`group`] — sort intervals and partition them by day
//! - [`merge`] — clip to the window and merge overlapping intervals
//! - [`slots`] — free gaps between merged busy blocks
//! - [`window`] — the validated daily window
//! - [`availability`] — the whole pipeline across many calendars
//! - [`error`] — Error types

pub mod availability;
pub mod calendar;
pub mod error;
pub mod group;
pub mod merge;
pub mod slots;
pub mod span;
pub mod window;

pub use availability::{
    compute_availability, find_first_free_slot, find_free_slots, DateRange, DayAvailability,
};
pub use calendar::{add_days, compare_dates, day_key, CalendarDate, DayKey};
pub use error::EngineError;
pub use merge::{merge_day, MergedInterval};
pub use slots::{free_slots, FreeSlot};
pub use span::{expand_span, BusySpan, DayInterval};
pub use window::WindowConfig;
