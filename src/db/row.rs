//! Conversion between `Record` and a CSV row of the log file.

use crate::models::record::Record;
use crate::utils::date::parse_log_date;
use crate::utils::time::parse_log_time;
use chrono::NaiveTime;
use csv::StringRecord;

pub(crate) fn to_row(r: &Record) -> [String; 5] {
    [
        r.date_str(),
        r.task.clone(),
        r.start_str(),
        r.end_str(),
        r.duration_minutes.to_string(),
    ]
}

/// Parse one log row. The error is a human-readable reason.
pub(crate) fn from_row(row: &StringRecord) -> Result<Record, String> {
    if row.len() != 5 {
        return Err(format!("expected 5 fields, found {}", row.len()));
    }

    let date = parse_log_date(&row[0]).ok_or_else(|| format!("invalid date '{}'", &row[0]))?;
    let start = optional_time(&row[2])?;
    let end = optional_time(&row[3])?;
    let duration = parse_duration(&row[4]).ok_or_else(|| format!("invalid duration '{}'", &row[4]))?;

    Ok(Record::new(date, &row[1], start, end, duration))
}

/// Time cell that may be left empty (imported rows without start/end).
fn optional_time(cell: &str) -> Result<Option<NaiveTime>, String> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    parse_log_time(cell).map(Some).map_err(|e| e.to_string())
}

/// Whole minutes; decimal values (`"30.0"`) are rounded.
pub(crate) fn parse_duration(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.round() as i64)
}
