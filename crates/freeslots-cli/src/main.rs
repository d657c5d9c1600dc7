//! `freeslots` CLI — find the time when everyone in a set of calendars is free.
//!
//! ## Usage
//!
//! ```sh
//! # Free time across two calendars, whole days
//! freeslots alice.csv bob.csv
//!
//! # Office hours only, at least 30 minutes
//! freeslots -w 09:00-17:00 -m 30 alice.csv bob.csv
//!
//! # Every day of a week, including days nobody is busy
//! freeslots --from 2024-03-04 --to 2024-03-08 alice.csv
//!
//! # First suitable slot only, as JSON
//! freeslots -m 60 --first --format json alice.csv bob.csv
//! ```
//!
//! Each CSV line starts with `start date,start time,end date,end time`
//! (`YYYY-MM-DD`, `HH:MM`). Diagnostics go to stderr; set `RUST_LOG=debug`
//! for per-day detail.

mod record;
mod render;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use freeslot_engine::{
    find_first_free_slot, find_free_slots, CalendarDate, DateRange, WindowConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use render::OutputFormat;

#[derive(Parser)]
#[command(
    name = "freeslots",
    version,
    about = "Merge busy times across CSV calendars and print when everyone is free"
)]
struct Cli {
    /// CSV files with busy spans (one calendar each)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Daily window to consider, HH:MM-HH:MM
    #[arg(short, long, value_parser = parse_window, default_value = "00:00-24:00")]
    window: (u32, u32),

    /// Minimum free-slot length to report, in minutes
    #[arg(short, long = "min", default_value_t = 0)]
    min: u32,

    /// First day to report, YYYY-MM-DD (requires --to)
    #[arg(long, value_parser = parse_date_arg, requires = "to")]
    from: Option<CalendarDate>,

    /// Last day to report, YYYY-MM-DD (requires --from)
    #[arg(long, value_parser = parse_date_arg, requires = "from")]
    to: Option<CalendarDate>,

    /// Print only the earliest slot meeting the minimum length
    #[arg(long)]
    first: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (window_start, window_end) = cli.window;
    let window = WindowConfig::new(window_start, window_end, cli.min)
        .context("Invalid -w/--window")?;

    let range = match (cli.from, cli.to) {
        (Some(from), Some(to)) => {
            Some(DateRange::new(from, to).context("Invalid --from/--to range")?)
        }
        _ => None,
    };

    let mut spans = Vec::new();
    for path in &cli.files {
        spans.extend(record::read_spans(path)?);
    }
    info!(files = cli.files.len(), spans = spans.len(), "loaded busy spans");

    let slots = if cli.first {
        find_first_free_slot(spans, &window, range)
            .context("Failed to compute free slots")?
            .into_iter()
            .collect()
    } else {
        find_free_slots(spans, &window, range).context("Failed to compute free slots")?
    };
    info!(slots = slots.len(), "computed free slots");

    let text = render::render(&slots, cli.format)?;
    write_output(cli.output.as_ref(), &text)
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Parse `HH:MM-HH:MM` into a pair of minute offsets.
///
/// Order is not checked here; `WindowConfig::new` rejects a window that ends
/// before it starts.
fn parse_window(s: &str) -> std::result::Result<(u32, u32), String> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| format!("Bad window '{}'. Use HH:MM-HH:MM", s))?;
    let start = record::parse_hhmm(start).map_err(|e| e.to_string())?;
    let end = record::parse_hhmm(end).map_err(|e| e.to_string())?;
    Ok((start, end))
}

fn parse_date_arg(s: &str) -> std::result::Result<CalendarDate, String> {
    record::parse_date(s).map_err(|e| e.to_string())
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
