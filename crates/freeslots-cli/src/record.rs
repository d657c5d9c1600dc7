//! Busy-span records from TimeEdit-style CSV exports.
//!
//! Each line starts with four fields: start date, start time, end date, end
//! time (`YYYY-MM-DD`, `HH:MM`). Further fields are ignored. Lines that do not
//! parse are skipped; a first line whose leading field is not a date is taken
//! as a header and skipped quietly. A leading byte-order mark is ignored.

use std::path::Path;

use anyhow::{Context, Result};
use freeslot_engine::{BusySpan, CalendarDate};
use thiserror::Error;
use tracing::{debug, warn};

/// Fields of a record the engine needs.
const RECORD_FIELDS: usize = 4;

/// Why a CSV line was not turned into a [`BusySpan`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 4 fields, found {0}")]
    TooFewFields(usize),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    Date(String),

    #[error("invalid time '{0}' (expected HH:MM between 00:00 and 24:00)")]
    Time(String),
}

/// Split the first `max_fields` comma-separated fields off `line`.
///
/// A field starting with `"` runs to the next lone `"`, with `""` standing
/// for a literal quote; text between the closing quote and the next comma is
/// dropped.
pub fn split_fields(line: &str, max_fields: usize) -> Vec<String> {
    let mut fields = Vec::new();
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return fields;
    }

    let mut chars = line.chars().peekable();
    while fields.len() < max_fields {
        let mut field = String::new();
        if chars.next_if_eq(&'"').is_some() {
            while let Some(c) = chars.next() {
                if c != '"' {
                    field.push(c);
                } else if chars.next_if_eq(&'"').is_some() {
                    field.push('"');
                } else {
                    break;
                }
            }
            for c in chars.by_ref() {
                if c == ',' {
                    break;
                }
            }
        } else {
            for c in chars.by_ref() {
                if c == ',' {
                    break;
                }
                field.push(c);
            }
        }
        fields.push(field);

        if chars.peek().is_none() {
            break;
        }
    }

    fields
}

/// Parse `HH:MM` into minutes since midnight. `24:00` is the end of the day.
pub fn parse_hhmm(s: &str) -> Result<u32, RecordError> {
    let bad = || RecordError::Time(s.to_string());
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(bad());
    }
    let hours = two_digits(&bytes[0..2]).ok_or_else(bad)?;
    let minutes = two_digits(&bytes[3..5]).ok_or_else(bad)?;
    if hours > 24 || minutes > 59 || (hours == 24 && minutes != 0) {
        return Err(bad());
    }
    Ok(hours * 60 + minutes)
}

/// Parse `YYYY-MM-DD` into a validated date.
pub fn parse_date(s: &str) -> Result<CalendarDate, RecordError> {
    let bad = || RecordError::Date(s.to_string());
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(bad());
    }
    let year = two_digits(&bytes[0..2])
        .zip(two_digits(&bytes[2..4]))
        .map(|(hi, lo)| hi * 100 + lo)
        .ok_or_else(bad)?;
    let month = two_digits(&bytes[5..7]).ok_or_else(bad)?;
    let day = two_digits(&bytes[8..10]).ok_or_else(bad)?;
    CalendarDate::new(year as i32, month, day).map_err(|_| bad())
}

fn two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

/// Parse one CSV line into a busy span.
pub fn parse_record(line: &str) -> Result<BusySpan, RecordError> {
    let fields = split_fields(line, RECORD_FIELDS);
    if fields.len() < RECORD_FIELDS {
        return Err(RecordError::TooFewFields(fields.len()));
    }

    let start_date = parse_date(fields[0].trim())?;
    let start_minute = parse_hhmm(fields[1].trim())?;
    let end_date = parse_date(fields[2].trim())?;
    let end_minute = parse_hhmm(fields[3].trim())?;

    // Both minutes are at most 1440 after parse_hhmm.
    BusySpan::new(start_date, start_minute, end_date, end_minute)
        .map_err(|_| RecordError::Time(fields[3].clone()))
}

/// A line whose first field does not start with a digit, such as
/// `Start date,Start time,...`.
fn looks_like_header(line: &str) -> bool {
    !line
        .trim_start()
        .trim_start_matches('"')
        .starts_with(|c: char| c.is_ascii_digit())
}

/// Read every well-formed busy span from the CSV file at `path`.
///
/// Malformed lines are logged and skipped. Bytes that are not valid UTF-8 are
/// replaced rather than rejected.
///
/// # Errors
/// Fails only when the file cannot be read.
pub fn read_spans(path: &Path) -> Result<Vec<BusySpan>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);

    let mut spans = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Ok(span) => spans.push(span),
            Err(err) if index == 0 && looks_like_header(line) => {
                debug!(file = %path.display(), %err, "skipping header line");
            }
            Err(err) => {
                warn!(
                    file = %path.display(),
                    line = index + 1,
                    %err,
                    "skipping malformed record"
                );
            }
        }
    }

    debug!(file = %path.display(), spans = spans.len(), "read busy spans");
    Ok(spans)
}
