//! Merge one day's busy intervals into maximal, disjoint busy blocks.
//!
//! Intervals are clipped to the daily window first; whatever collapses to
//! nothing is dropped. Overlapping and exactly touching intervals merge, so
//! consecutive blocks are always separated by at least one free minute.

use serde::Serialize;

use crate::calendar::DayKey;
use crate::span::DayInterval;
use crate::window::WindowConfig;

/// A maximal busy block within one day's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergedInterval {
    pub day: DayKey,
    pub start_minute: u16,
    pub end_minute: u16,
}

impl MergedInterval {
    pub fn duration_minutes(&self) -> u16 {
        self.end_minute.saturating_sub(self.start_minute)
    }
}

impl From<MergedInterval> for DayInterval {
    fn from(merged: MergedInterval) -> Self {
        DayInterval {
            day: merged.day,
            start_minute: merged.start_minute,
            end_minute: merged.end_minute,
        }
    }
}

/// Merge a single day's intervals, already sorted by `(start, end)`.
///
/// Returns blocks sorted by start with `blocks[i].end_minute <
/// blocks[i + 1].start_minute`. Runs in one pass over `intervals`.
pub fn merge_day(intervals: &[DayInterval], window: &WindowConfig) -> Vec<MergedInterval> {
    debug_assert!(
        intervals
            .windows(2)
            .all(|w| (w[0].day, w[0].start_minute) <= (w[1].day, w[1].start_minute)),
        "merge_day expects intervals sorted by start"
    );

    let mut merged: Vec<MergedInterval> = Vec::new();
    for interval in intervals {
        let Some((start, end)) = window.clip(interval) else {
            continue;
        };

        if let Some(last) = merged.last_mut() {
            if start <= last.end_minute {
                last.end_minute = last.end_minute.max(end);
                continue;
            }
        }
        merged.push(MergedInterval {
            day: interval.day,
            start_minute: start,
            end_minute: end,
        });
    }

    merged
}
