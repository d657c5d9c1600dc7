//! Integration tests for the `freeslots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the actual binary over
//! CSV fixtures, covering window and minimum options, date ranges, output
//! formats, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to a CSV fixture.
fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn freeslots() -> Command {
    let mut cmd = Command::cargo_bin("freeslots").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Merging calendars
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merges_two_calendars_over_whole_days() {
    freeslots()
        .args([fixture("alice.csv"), fixture("bob.csv")])
        .assert()
        .success()
        .stdout(
            "Date,Start,End,Duration_min\n\
             2024-01-01,00:00,09:00,540\n\
             2024-01-01,11:00,13:00,120\n\
             2024-01-01,14:00,24:00,600\n\
             2024-01-02,00:00,08:00,480\n\
             2024-01-02,09:00,23:00,840\n\
             2024-01-03,01:00,24:00,1380\n",
        );
}

#[test]
fn window_and_minimum_restrict_slots() {
    freeslots()
        .args(["-w", "09:00-17:00", "-m", "120"])
        .args([fixture("alice.csv"), fixture("bob.csv")])
        .assert()
        .success()
        .stdout(
            "Date,Start,End,Duration_min\n\
             2024-01-01,11:00,13:00,120\n\
             2024-01-01,14:00,17:00,180\n\
             2024-01-02,09:00,17:00,480\n\
             2024-01-03,09:00,17:00,480\n",
        );
}

#[test]
fn malformed_records_are_skipped_with_a_warning() {
    freeslots()
        .arg(fixture("bob.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01,00:00,10:00,600"))
        .stderr(predicate::str::contains("skipping malformed record"))
        .stderr(predicate::str::contains("header").not());
}

#[test]
fn byte_order_mark_does_not_hide_first_record() {
    freeslots()
        .arg(fixture("bom.csv"))
        .assert()
        .success()
        .stdout(
            "Date,Start,End,Duration_min\n\
             2024-01-01,00:00,09:00,540\n\
             2024-01-01,10:00,24:00,840\n",
        )
        .stderr(predicate::str::contains("skipping malformed record").not());
}

#[test]
fn malformed_first_record_is_warned_not_treated_as_header() {
    freeslots()
        .arg(fixture("bad_first.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-02,00:00,09:00,540"))
        .stdout(predicate::str::contains("2024-13-01").not())
        .stderr(predicate::str::contains("skipping malformed record"));
}

#[test]
fn span_across_leap_day_busies_february_29() {
    freeslots()
        .arg(fixture("leap.csv"))
        .assert()
        .success()
        .stdout(
            "Date,Start,End,Duration_min\n\
             2024-02-28,00:00,23:00,1380\n\
             2024-03-01,01:00,24:00,1380\n",
        );
}

// ─────────────────────────────────────────────────────────────────────────────
// Date range and --first
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn date_range_reports_quiet_days() {
    freeslots()
        .args(["-w", "09:00-17:00", "--from", "2024-02-27", "--to", "2024-03-01"])
        .arg(fixture("leap.csv"))
        .assert()
        .success()
        .stdout(
            "Date,Start,End,Duration_min\n\
             2024-02-27,09:00,17:00,480\n\
             2024-02-28,09:00,17:00,480\n\
             2024-03-01,09:00,17:00,480\n",
        );
}

#[test]
fn first_prints_only_earliest_matching_slot() {
    freeslots()
        .args(["-m", "600", "--first"])
        .args([fixture("alice.csv"), fixture("bob.csv")])
        .assert()
        .success()
        .stdout("Date,Start,End,Duration_min\n2024-01-01,14:00,24:00,600\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Output formats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn json_output_parses() {
    let output = freeslots()
        .args(["--format", "json", "-w", "09:00-17:00"])
        .arg(fixture("leap.csv"))
        .output()
        .expect("freeslots should run");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");
    let slots = value.as_array().expect("JSON output should be an array");
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["date"], "2024-02-28");
    assert_eq!(slots[0]["start"], "09:00");
    assert_eq!(slots[1]["date"], "2024-03-01");
    assert_eq!(slots[1]["duration_minutes"], 480);
}

#[test]
fn table_output_has_header() {
    freeslots()
        .args(["--format", "table"])
        .arg(fixture("leap.csv"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date         Start   End"))
        .stdout(predicate::str::contains("2024-02-28   00:00   23:00   1380"));
}

#[test]
fn writes_to_output_file() {
    let path = std::env::temp_dir().join(format!("freeslots-test-{}.csv", std::process::id()));
    let _ = std::fs::remove_file(&path);

    freeslots()
        .arg("-o")
        .arg(&path)
        .arg(fixture("leap.csv"))
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&path).expect("output file must exist");
    assert!(content.starts_with("Date,Start,End,Duration_min\n"));
    assert!(content.contains("2024-03-01,01:00,24:00,1380"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_input_prints_header_only() {
    let path = std::env::temp_dir().join(format!("freeslots-empty-{}.csv", std::process::id()));
    std::fs::write(&path, "").unwrap();

    freeslots()
        .arg(&path)
        .assert()
        .success()
        .stdout("Date,Start,End,Duration_min\n");

    let _ = std::fs::remove_file(&path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn window_ending_before_start_is_rejected() {
    freeslots()
        .args(["-w", "17:00-09:00"])
        .arg(fixture("alice.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid -w/--window"));
}

#[test]
fn malformed_window_is_rejected() {
    freeslots()
        .args(["-w", "9-17"])
        .arg(fixture("alice.csv"))
        .assert()
        .failure();
}

#[test]
fn negative_minimum_is_rejected() {
    freeslots()
        .args(["-m", "-5"])
        .arg(fixture("alice.csv"))
        .assert()
        .failure();
}

#[test]
fn from_without_to_is_rejected() {
    freeslots()
        .args(["--from", "2024-01-01"])
        .arg(fixture("alice.csv"))
        .assert()
        .failure();
}

#[test]
fn reversed_range_is_rejected() {
    freeslots()
        .args(["--from", "2024-01-02", "--to", "2024-01-01"])
        .arg(fixture("alice.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --from/--to range"));
}

#[test]
fn missing_file_fails() {
    freeslots()
        .arg("/nonexistent/calendar.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn no_files_shows_usage_error() {
    freeslots()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
