//! Pure date arithmetic over proleptic Gregorian calendar dates.
//!
//! Dates are plain `(year, month, day)` triples with no time zone attached.
//! [`DayKey`] packs a date into a single integer that sorts the same way the
//! date does, which is what the day grouper partitions on.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::error::{EngineError, Result};

/// Minutes in one calendar day; also the exclusive upper bound of a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Smallest supported year.
pub const MIN_YEAR: i32 = 0;

/// Largest supported year. Four-digit years keep [`DayKey`] monotonic.
pub const MAX_YEAR: i32 = 9999;

/// Month steps [`add_days`] may take before giving up.
pub const MAX_NORMALIZE_STEPS: u32 = 3650;

/// Returns `true` for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A validated calendar date.
///
/// Ordering is lexicographic on `(year, month, day)`, which the derived
/// `Ord` provides through field declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Build a date, checking the month and the day against the month length.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidDate` when the year is outside
    /// `MIN_YEAR..=MAX_YEAR`, the month is not 1-12, or the day does not exist
    /// in that month.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        let valid = (MIN_YEAR..=MAX_YEAR).contains(&year)
            && (1..=12).contains(&month)
            && (1..=days_in_month(year, month)).contains(&day);
        if !valid {
            return Err(EngineError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The following calendar day, or `None` past `MAX_YEAR`-12-31.
    pub fn succ(self) -> Option<Self> {
        if self.day < days_in_month(self.year, self.month) {
            Some(Self {
                day: self.day + 1,
                ..self
            })
        } else if self.month < 12 {
            Some(Self {
                month: self.month + 1,
                day: 1,
                ..self
            })
        } else if self.year < MAX_YEAR {
            Some(Self {
                year: self.year + 1,
                month: 1,
                day: 1,
            })
        } else {
            None
        }
    }

    /// Shorthand for [`add_days`].
    pub fn add_days(self, delta: i64) -> Result<Self> {
        add_days(self, delta)
    }

    /// Shorthand for [`day_key`].
    pub fn key(self) -> DayKey {
        day_key(self)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Shift `date` by `delta` days, carrying into months and years.
///
/// Positive overflow repeatedly subtracts the current month's length and
/// advances the month; underflow steps back a month and adds that month's
/// length. Each month step counts against `MAX_NORMALIZE_STEPS`.
///
/// # Errors
/// Returns `EngineError::ArithmeticRange` when normalization needs more than
/// `MAX_NORMALIZE_STEPS` month steps or lands outside the supported years.
pub fn add_days(date: CalendarDate, delta: i64) -> Result<CalendarDate> {
    let fault = || EngineError::ArithmeticRange {
        date: date.to_string(),
        delta,
    };

    let mut year = date.year;
    let mut month = date.month;
    let mut day = i64::from(date.day).checked_add(delta).ok_or_else(fault)?;
    let mut steps = 0u32;

    while day > i64::from(days_in_month(year, month)) {
        if steps == MAX_NORMALIZE_STEPS {
            return Err(fault());
        }
        steps += 1;
        day -= i64::from(days_in_month(year, month));
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }

    while day < 1 {
        if steps == MAX_NORMALIZE_STEPS {
            return Err(fault());
        }
        steps += 1;
        month -= 1;
        if month < 1 {
            month = 12;
            year -= 1;
        }
        day += i64::from(days_in_month(year, month));
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(fault());
    }

    Ok(CalendarDate {
        year,
        month,
        // 1..=31 after normalization.
        day: day as u32,
    })
}

/// Lexicographic comparison on `(year, month, day)`.
pub fn compare_dates(a: &CalendarDate, b: &CalendarDate) -> Ordering {
    a.cmp(b)
}

/// Dense grouping key `year * 10000 + month * 100 + day`.
///
/// Sorts identically to [`CalendarDate`] for every supported date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DayKey(u32);

impl DayKey {
    pub fn value(self) -> u32 {
        self.0
    }

    /// Decode the key back into the date it was built from.
    pub fn date(self) -> CalendarDate {
        CalendarDate {
            year: (self.0 / 10_000) as i32,
            month: (self.0 / 100) % 100,
            day: self.0 % 100,
        }
    }
}

impl From<CalendarDate> for DayKey {
    fn from(date: CalendarDate) -> Self {
        day_key(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.date().fmt(f)
    }
}

/// Grouping key for `date`. See [`DayKey`].
pub fn day_key(date: CalendarDate) -> DayKey {
    // MIN_YEAR is 0, so the year is never negative here.
    DayKey(date.year as u32 * 10_000 + date.month * 100 + date.day)
}
