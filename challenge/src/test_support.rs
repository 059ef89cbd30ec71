//! Test-only helpers shared by unit and integration tests.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

/// Build a calendar date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Write `contents` to `challenge.toml` inside a fresh temp dir.
///
/// The returned guard must outlive any use of the path.
pub fn temp_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("challenge.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}
