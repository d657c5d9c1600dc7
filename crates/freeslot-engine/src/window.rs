//! The daily window and minimum slot length applied to every day.

use serde::Serialize;

use crate::calendar::MINUTES_PER_DAY;
use crate::error::{EngineError, Result};
use crate::span::{minute_of_day, DayInterval};

/// Portion of each day searched for free time, plus the shortest free slot
/// worth reporting.
///
/// Always satisfies `start_minute <= end_minute <= 1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowConfig {
    start_minute: u16,
    end_minute: u16,
    minimum_slot_minutes: u32,
}

impl WindowConfig {
    /// Validate and build a window `[start_minute, end_minute)`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidMinute` when either bound exceeds 1440 and
    /// `EngineError::InvalidWindow` when the window ends before it starts.
    pub fn new(start_minute: u32, end_minute: u32, minimum_slot_minutes: u32) -> Result<Self> {
        let start = minute_of_day(start_minute)?;
        let end = minute_of_day(end_minute)?;
        if start > end {
            return Err(EngineError::InvalidWindow { start, end });
        }
        Ok(Self {
            start_minute: start,
            end_minute: end,
            minimum_slot_minutes,
        })
    }

    pub fn start_minute(&self) -> u16 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u16 {
        self.end_minute
    }

    pub fn minimum_slot_minutes(&self) -> u32 {
        self.minimum_slot_minutes
    }

    /// Same window with a different minimum slot length.
    pub fn with_minimum(self, minimum_slot_minutes: u32) -> Self {
        Self {
            minimum_slot_minutes,
            ..self
        }
    }

    /// Clip `interval` to the window, or `None` when nothing remains.
    pub fn clip(&self, interval: &DayInterval) -> Option<(u16, u16)> {
        let start = interval.start_minute.max(self.start_minute);
        let end = interval.end_minute.min(self.end_minute);
        (end > start).then_some((start, end))
    }
}

impl Default for WindowConfig {
    /// The whole day, `00:00-24:00`, with no minimum.
    fn default() -> Self {
        Self {
            start_minute: 0,
            end_minute: MINUTES_PER_DAY,
            minimum_slot_minutes: 0,
        }
    }
}
