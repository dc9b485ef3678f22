use chrono::{Duration, NaiveDate, NaiveDateTime};

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a date cell from the log file.
///
/// Besides `YYYY-MM-DD`, older imports wrote full timestamps
/// (`YYYY-MM-DD HH:MM:SS`); only the date part is kept.
pub fn parse_log_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(d) = parse_date(s) {
        return Some(d);
    }

    let dt_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    dt_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

/// The `days` calendar days ending at `as_of` inclusive, newest first.
pub fn trailing_days(as_of: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days as i64).map(|i| as_of - Duration::days(i)).collect()
}

/// First day of the trailing window of `days` days ending at `as_of`.
pub fn window_start(as_of: NaiveDate, days: u32) -> NaiveDate {
    as_of - Duration::days(days.saturating_sub(1) as i64)
}
