//! Sort per-day intervals and partition them into one group per day.

use crate::calendar::DayKey;
use crate::span::DayInterval;

/// All busy intervals of one day, sorted by `(start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub day: DayKey,
    pub intervals: &'a [DayInterval],
}

/// Intervals from every source, sorted by `(day, start, end)`.
#[derive(Debug, Clone, Default)]
pub struct DayGroups {
    sorted: Vec<DayInterval>,
}

impl DayGroups {
    pub fn new(mut intervals: Vec<DayInterval>) -> Self {
        intervals.sort_unstable_by_key(|iv| (iv.day, iv.start_minute, iv.end_minute));
        Self { sorted: intervals }
    }

    /// One group per distinct day, in ascending day order.
    pub fn iter(&self) -> impl Iterator<Item = DayGroup<'_>> {
        // `chunk_by` never yields an empty chunk.
        self.sorted
            .chunk_by(|a, b| a.day == b.day)
            .map(|chunk| DayGroup {
                day: chunk[0].day,
                intervals: chunk,
            })
    }

    /// Total number of intervals across all days.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }
}

impl FromIterator<DayInterval> for DayGroups {
    fn from_iter<I: IntoIterator<Item = DayInterval>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
