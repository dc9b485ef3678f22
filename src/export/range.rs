// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse --range into inclusive date bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by ':' (same shape on both sides)
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());

        if start.len() != end.len() {
            return Err(AppError::InvalidDate(format!(
                "range bounds must have the same format: {r}"
            )));
        }

        let (d1, _) = bounds(start)?;
        let (_, d2) = bounds(end)?;
        if d2 < d1 {
            return Err(AppError::InvalidDate(format!("range ends before it starts: {r}")));
        }
        return Ok((d1, d2));
    }

    bounds(r.trim())
}

/// First and last day covered by a single YYYY / YYYY-MM / YYYY-MM-DD value.
fn bounds(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(s.to_string());

    match s.len() {
        4 => {
            let y: i32 = s.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        7 => {
            let first =
                NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((first, month_last_day(first).ok_or_else(invalid)?))
        }
        10 => {
            let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

fn month_last_day(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn single_values() {
        assert_eq!(parse_range("2024").unwrap(), (d("2024-01-01"), d("2024-12-31")));
        assert_eq!(parse_range("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(parse_range("2023-12").unwrap(), (d("2023-12-01"), d("2023-12-31")));
        assert_eq!(parse_range("2024-02-10").unwrap(), (d("2024-02-10"), d("2024-02-10")));
    }

    #[test]
    fn ranges() {
        assert_eq!(
            parse_range("2024-01:2024-03").unwrap(),
            (d("2024-01-01"), d("2024-03-31"))
        );
        assert!(parse_range("2024:2024-03").is_err());
        assert!(parse_range("2024-03-02:2024-03-01").is_err());
        assert!(parse_range("yesterday").is_err());
    }
}
