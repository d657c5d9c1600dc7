//! Busy-span expansion -- splits a multi-day busy span into per-day intervals.
//!
//! A span from `2024-02-28 23:00` to `2024-03-01 01:00` becomes one interval
//! per calendar day it touches: `23:00-24:00` on the 28th, the whole of the
//! 29th, and `00:00-01:00` on March 1st.

use std::iter::FusedIterator;

use serde::Serialize;
use tracing::{debug, trace};

use crate::calendar::{add_days, CalendarDate, DayKey, MINUTES_PER_DAY};
use crate::error::{EngineError, Result};

/// Longest span, in days past its start date, that [`expand_span`] accepts.
pub const MAX_SPAN_DAYS: i64 = 3650;

/// One continuous busy period, possibly crossing midnight.
///
/// Minutes are offsets from midnight in `0..=1440`; `1440` is the end of the
/// day (`24:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusySpan {
    pub start_date: CalendarDate,
    pub start_minute: u16,
    pub end_date: CalendarDate,
    pub end_minute: u16,
}

impl BusySpan {
    /// Build a span, checking both minute offsets.
    ///
    /// Date order is not checked: a span that ends before it starts expands
    /// to a single zero-length interval instead of failing.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidMinute` when a minute offset exceeds 1440.
    pub fn new(
        start_date: CalendarDate,
        start_minute: u32,
        end_date: CalendarDate,
        end_minute: u32,
    ) -> Result<Self> {
        Ok(Self {
            start_date,
            start_minute: minute_of_day(start_minute)?,
            end_date,
            end_minute: minute_of_day(end_minute)?,
        })
    }

    /// Expand into per-day intervals. See [`expand_span`].
    pub fn days(&self) -> Result<DaySpans> {
        expand_span(self)
    }
}

/// Checked conversion of a minute offset into the `0..=1440` range.
pub fn minute_of_day(minute: u32) -> Result<u16> {
    if minute > u32::from(MINUTES_PER_DAY) {
        return Err(EngineError::InvalidMinute(minute));
    }
    Ok(minute as u16)
}

/// The busy part of a single day, `[start_minute, end_minute)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayInterval {
    pub day: DayKey,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl DayInterval {
    pub fn duration_minutes(&self) -> u16 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    pub fn is_empty(&self) -> bool {
        self.end_minute <= self.start_minute
    }
}

/// Lazy per-day projection of a [`BusySpan`], produced by [`expand_span`].
#[derive(Debug, Clone)]
pub struct DaySpans {
    next: Option<CalendarDate>,
    start_date: CalendarDate,
    start_minute: u16,
    end_date: CalendarDate,
    end_minute: u16,
}

impl Iterator for DaySpans {
    type Item = DayInterval;

    fn next(&mut self) -> Option<DayInterval> {
        let current = self.next?;
        let last_day = current == self.end_date;

        let start_minute = if current == self.start_date {
            self.start_minute
        } else {
            0
        };
        let end_minute = if last_day {
            self.end_minute
        } else {
            MINUTES_PER_DAY
        };

        self.next = if last_day { None } else { current.succ() };

        Some(DayInterval {
            day: current.key(),
            start_minute,
            end_minute: end_minute.max(start_minute),
        })
    }
}

impl FusedIterator for DaySpans {}

/// Expand `span` into one [`DayInterval`] per calendar day it touches.
///
/// Both endpoint days are always emitted, even at zero length. Days strictly
/// inside the span cover `0..1440`. A span whose end date precedes its start
/// date yields one zero-length interval on the start date.
///
/// # Errors
/// Returns `EngineError::SpanTooLong` when the end date lies more than
/// `MAX_SPAN_DAYS` after the start date.
pub fn expand_span(span: &BusySpan) -> Result<DaySpans> {
    let (end_date, end_minute) = if span.end_date < span.start_date {
        debug!(
            start = %span.start_date,
            end = %span.end_date,
            "busy span ends before it starts, clamping to zero length"
        );
        (span.start_date, span.start_minute)
    } else {
        // An unrepresentable limit lies past every supported end date.
        if let Ok(limit) = add_days(span.start_date, MAX_SPAN_DAYS) {
            if span.end_date > limit {
                return Err(EngineError::SpanTooLong {
                    start: span.start_date.to_string(),
                    end: span.end_date.to_string(),
                    max_days: MAX_SPAN_DAYS,
                });
            }
        }
        (span.end_date, span.end_minute)
    };

    trace!(
        start = %span.start_date,
        end = %end_date,
        "expanding busy span"
    );

    Ok(DaySpans {
        next: Some(span.start_date),
        start_date: span.start_date,
        start_minute: span.start_minute,
        end_date,
        end_minute,
    })
}
