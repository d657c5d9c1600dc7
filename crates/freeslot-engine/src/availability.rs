//! Availability across many calendars -- the full engine pipeline.
//!
//! Busy spans from every calendar are flattened into one undifferentiated busy
//! set, expanded into per-day intervals, grouped by day, merged, and turned
//! into free slots. Days come out in ascending order and slots within a day in
//! ascending start order.

use serde::Serialize;
use tracing::debug;

use crate::calendar::{CalendarDate, DayKey};
use crate::error::{EngineError, Result};
use crate::group::DayGroups;
use crate::merge::{merge_day, MergedInterval};
use crate::slots::{free_slots, FreeSlot};
use crate::span::{expand_span, BusySpan, DayInterval};
use crate::window::WindowConfig;

/// Busy blocks and free slots of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub day: DayKey,
    /// Merged busy blocks (sorted by start, disjoint, clipped to the window).
    pub busy: Vec<MergedInterval>,
    /// Gaps between busy blocks that meet the minimum slot length.
    pub free: Vec<FreeSlot>,
}

impl DayAvailability {
    /// Merge one day's sorted intervals and derive its free slots.
    pub fn from_intervals(day: DayKey, intervals: &[DayInterval], window: &WindowConfig) -> Self {
        let busy = merge_day(intervals, window);
        let free: Vec<FreeSlot> = free_slots(day, &busy, window).collect();
        debug!(
            %day,
            intervals = intervals.len(),
            busy = busy.len(),
            free = free.len(),
            "merged day"
        );
        Self { day, busy, free }
    }
}

/// An inclusive range of calendar days to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    from: CalendarDate,
    to: CalendarDate,
}

impl DateRange {
    /// # Errors
    /// Returns `EngineError::InvalidRange` when `to` precedes `from`.
    pub fn new(from: CalendarDate, to: CalendarDate) -> Result<Self> {
        if to < from {
            return Err(EngineError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    pub fn first(&self) -> CalendarDate {
        self.from
    }

    pub fn last(&self) -> CalendarDate {
        self.to
    }

    pub fn contains(&self, day: DayKey) -> bool {
        (self.from.key()..=self.to.key()).contains(&day)
    }

    /// Every day of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> {
        let to = self.to;
        std::iter::successors(Some(self.from), move |d| d.succ().filter(|n| *n <= to))
    }
}

/// Compute per-day availability for all `spans` under `window`.
///
/// Without a `range`, only days touched by at least one busy span are
/// reported. With a `range`, busy time outside it is ignored and every day
/// inside it is reported, days without busy time showing the whole window
/// free.
///
/// # Errors
/// Propagates `EngineError::SpanTooLong` from span expansion. Nothing is
/// returned for a partially processed input.
pub fn compute_availability<I>(
    spans: I,
    window: &WindowConfig,
    range: Option<DateRange>,
) -> Result<Vec<DayAvailability>>
where
    I: IntoIterator<Item = BusySpan>,
{
    let mut intervals: Vec<DayInterval> = Vec::new();
    for span in spans {
        intervals.extend(
            expand_span(&span)?.filter(|iv| range.is_none_or(|r| r.contains(iv.day))),
        );
    }

    let groups = DayGroups::new(intervals);
    debug!(intervals = groups.len(), "grouped busy intervals");

    let days: Vec<DayAvailability> = match range {
        None => groups
            .iter()
            .map(|g| DayAvailability::from_intervals(g.day, g.intervals, window))
            .collect(),
        Some(range) => {
            let mut busy_days = groups.iter().peekable();
            range
                .days()
                .map(|date| {
                    let day = date.key();
                    match busy_days.next_if(|g| g.day == day) {
                        Some(g) => DayAvailability::from_intervals(day, g.intervals, window),
                        None => DayAvailability::from_intervals(day, &[], window),
                    }
                })
                .collect()
        }
    };

    Ok(days)
}

/// All free slots across all days, in ascending `(day, start)` order.
pub fn find_free_slots<I>(
    spans: I,
    window: &WindowConfig,
    range: Option<DateRange>,
) -> Result<Vec<FreeSlot>>
where
    I: IntoIterator<Item = BusySpan>,
{
    Ok(compute_availability(spans, window, range)?
        .into_iter()
        .flat_map(|day| day.free)
        .collect())
}

/// The earliest free slot meeting the window's minimum length, if any.
///
/// Delegates to [`find_free_slots`].
pub fn find_first_free_slot<I>(
    spans: I,
    window: &WindowConfig,
    range: Option<DateRange>,
) -> Result<Option<FreeSlot>>
where
    I: IntoIterator<Item = BusySpan>,
{
    Ok(find_free_slots(spans, window, range)?.into_iter().next())
}
