//! Integration tests for the `slots` binary.
//!
//! These use `assert_cmd` and `predicates` to run the offline `availability`
//! and `blocked-dates` queries against the seed fixture, with `--now` pinned so
//! the results do not depend on the wall clock.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the seed.json fixture.
fn seed_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/seed.json")
}

/// Helper: path to a seed whose interval has an unparseable time.
fn bad_seed_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/bad_interval.json")
}

/// Helper: the binary with configuration env vars cleared.
fn slots() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.env_remove("SERVER_TZ")
        .env_remove("SEED_FILE")
        .env_remove("HOST")
        .env_remove("PORT");
    cmd
}

/// Helper: parse stdout as JSON.
fn stdout_json(output: std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// availability
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn availability_excludes_booked_hour() {
    let output = slots()
        .args([
            "availability",
            "--seed",
            seed_path(),
            "--user",
            "ada",
            "--date",
            "2026-03-16",
            "--timezone-offset",
            "0",
            "--now",
            "2026-03-15T12:00:00Z",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(output);
    assert_eq!(json["possibleTimes"], serde_json::json!([8, 9, 10, 11, 12, 13, 14, 15, 16, 17]));
    assert_eq!(json["availableTimes"], serde_json::json!([8, 9, 11, 12, 13, 14, 15, 16, 17]));
}

#[test]
fn availability_accepts_negative_offsets() {
    // UTC+9 guest: 10:00Z on Monday is 19:00 local, outside the window, so
    // nothing of Monday 08:00-18:00 local is booked.
    let output = slots()
        .args([
            "availability",
            "--seed",
            seed_path(),
            "--user",
            "ada",
            "--date",
            "2026-03-16",
            "--timezone-offset",
            "-540",
            "--now",
            "2026-03-15T12:00:00Z",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(output);
    assert_eq!(json["availableTimes"].as_array().unwrap().len(), 10);
}

#[test]
fn availability_for_past_date_is_empty() {
    slots()
        .args([
            "availability",
            "--seed",
            seed_path(),
            "--user",
            "ada",
            "--date",
            "2026-03-16",
            "--timezone-offset",
            "0",
            "--now",
            "2026-04-01T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"possibleTimes":[],"availableTimes":[]}"#));
}

#[test]
fn availability_unknown_host_fails() {
    slots()
        .args([
            "availability",
            "--seed",
            seed_path(),
            "--user",
            "nobody",
            "--date",
            "2026-03-16",
            "--timezone-offset",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nobody"));
}

#[test]
fn availability_rejects_malformed_date() {
    slots()
        .args([
            "availability",
            "--seed",
            seed_path(),
            "--user",
            "ada",
            "--date",
            "16/03/2026",
            "--timezone-offset",
            "0",
        ])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// blocked-dates
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn blocked_dates_reports_weekend_and_full_day() {
    let output = slots()
        .args([
            "blocked-dates",
            "--seed",
            seed_path(),
            "--user",
            "ada",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(output);
    assert_eq!(json["blockedWeekDays"], serde_json::json!([0, 6]));
    assert_eq!(json["blockedDates"], serde_json::json!([23]));
}

#[test]
fn blocked_dates_for_single_day_host() {
    slots()
        .args([
            "blocked-dates",
            "--seed",
            seed_path(),
            "--user",
            "grace",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""blockedWeekDays":[0,1,2,4,5,6]"#));
}

#[test]
fn blocked_dates_rejects_month_13() {
    slots()
        .args([
            "blocked-dates",
            "--seed",
            seed_path(),
            "--user",
            "ada",
            "--year",
            "2026",
            "--month",
            "13",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn unknown_server_timezone_fails() {
    slots()
        .args([
            "blocked-dates",
            "--seed",
            seed_path(),
            "--user",
            "ada",
            "--year",
            "2026",
            "--month",
            "3",
            "--server-tz",
            "Mars/Olympus_Mons",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mars/Olympus_Mons"));
}

#[test]
fn missing_seed_file_fails() {
    slots()
        .args([
            "blocked-dates",
            "--seed",
            "/nonexistent/seed.json",
            "--user",
            "ada",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read seed file"));
}

#[test]
fn invalid_interval_in_seed_fails() {
    slots()
        .args([
            "blocked-dates",
            "--seed",
            bad_seed_path(),
            "--user",
            "linus",
            "--year",
            "2026",
            "--month",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid intervals"));
}

#[test]
fn help_lists_subcommands() {
    slots()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("availability"))
        .stdout(predicate::str::contains("blocked-dates"));
}
