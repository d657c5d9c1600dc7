//! Derive free slots from a day's merged busy blocks.
//!
//! Walks the blocks left to right with a cursor starting at the window start
//! and yields every gap before a block plus the trailing gap up to the window
//! end, keeping only gaps at least as long as the configured minimum.

use std::iter::FusedIterator;
use std::slice;

use serde::Serialize;

use crate::calendar::DayKey;
use crate::merge::MergedInterval;
use crate::window::WindowConfig;

/// A free time slot within one day's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub day: DayKey,
    pub start_minute: u16,
    pub end_minute: u16,
    pub duration_minutes: u16,
}

/// Lazy free-slot sequence for one day, produced by [`free_slots`].
#[derive(Debug, Clone)]
pub struct FreeSlots<'a> {
    day: DayKey,
    busy: slice::Iter<'a, MergedInterval>,
    cursor: u16,
    window_end: u16,
    minimum: u32,
    finished: bool,
}

/// The gap `[start, end)`, if it is non-empty and at least `minimum` long.
fn gap(day: DayKey, start: u16, end: u16, minimum: u32) -> Option<FreeSlot> {
    if end <= start {
        return None;
    }
    let duration_minutes = end - start;
    (u32::from(duration_minutes) >= minimum).then_some(FreeSlot {
        day,
        start_minute: start,
        end_minute: end,
        duration_minutes,
    })
}

impl Iterator for FreeSlots<'_> {
    type Item = FreeSlot;

    fn next(&mut self) -> Option<FreeSlot> {
        for block in self.busy.by_ref() {
            let slot = gap(self.day, self.cursor, block.start_minute, self.minimum);
            self.cursor = self.cursor.max(block.end_minute);
            if slot.is_some() {
                return slot;
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;
        gap(self.day, self.cursor, self.window_end, self.minimum)
    }
}

impl FusedIterator for FreeSlots<'_> {}

/// Free slots of `day` given its merged busy blocks, sorted by start.
///
/// With no busy blocks the whole window is one slot, provided it meets the
/// minimum. A window covered end to end yields nothing.
pub fn free_slots<'a>(
    day: DayKey,
    busy: &'a [MergedInterval],
    window: &WindowConfig,
) -> FreeSlots<'a> {
    FreeSlots {
        day,
        busy: busy.iter(),
        cursor: window.start_minute(),
        window_end: window.end_minute(),
        minimum: window.minimum_slot_minutes(),
        finished: false,
    }
}
