//! Time utilities: parsing HH:MM, extracting times from free-form cells.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use regex::Regex;
use std::sync::OnceLock;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Parse a time cell from the log file (`HH:MM`, tolerating `HH:MM:SS`).
pub fn parse_log_time(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    parse_time(t)
        .or_else(|| NaiveTime::parse_from_str(t, "%H:%M:%S").ok())
        .ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

fn hh_mm_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{2}:\d{2})").expect("static regex"))
}

/// First `HH:MM` found anywhere in `cell`, e.g. `"1900-01-01 09:05:00"` → 09:05.
pub fn extract_time(cell: &str) -> Option<NaiveTime> {
    hh_mm_regex()
        .captures(cell)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_time(m.as_str()))
}

/// Minutes from `start` to `end`, negative when `end` is earlier.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}
