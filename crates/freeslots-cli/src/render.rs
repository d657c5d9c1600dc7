//! Render free slots as CSV, an aligned table, or JSON.

use anyhow::Result;
use clap::ValueEnum;
use freeslot_engine::FreeSlot;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `Date,Start,End,Duration_min` rows
    #[default]
    Csv,
    /// Aligned columns for reading in a terminal
    Table,
    /// A JSON array of slot objects
    Json,
}

#[derive(Serialize)]
struct FreeSlotDto {
    date: String,
    start: String,
    end: String,
    duration_minutes: u16,
}

impl From<&FreeSlot> for FreeSlotDto {
    fn from(slot: &FreeSlot) -> Self {
        Self {
            date: slot.day.to_string(),
            start: format_minute(slot.start_minute),
            end: format_minute(slot.end_minute),
            duration_minutes: slot.duration_minutes,
        }
    }
}

/// `HH:MM` for a minute offset; the end of the day renders as `24:00`.
pub fn format_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

pub fn render(slots: &[FreeSlot], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Csv => {
            out.push_str("Date,Start,End,Duration_min\n");
            for slot in slots.iter().map(FreeSlotDto::from) {
                out.push_str(&format!(
                    "{},{},{},{}\n",
                    slot.date, slot.start, slot.end, slot.duration_minutes
                ));
            }
        }
        OutputFormat::Table => {
            out.push_str("Date         Start   End     Duration(min)\n");
            out.push_str("-------------------------------------------\n");
            for slot in slots.iter().map(FreeSlotDto::from) {
                out.push_str(&format!(
                    "{}   {}   {}   {}\n",
                    slot.date, slot.start, slot.end, slot.duration_minutes
                ));
            }
        }
        OutputFormat::Json => {
            let dtos: Vec<FreeSlotDto> = slots.iter().map(FreeSlotDto::from).collect();
            out = serde_json::to_string_pretty(&dtos)?;
            out.push('\n');
        }
    }
    Ok(out)
}
