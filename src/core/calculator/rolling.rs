use crate::models::record::Record;
use crate::models::task::TaskLabel;
use crate::utils::date::window_start;
use chrono::NaiveDate;

/// Length of the rolling window, in calendar days.
pub const ROLLING_WINDOW_DAYS: u32 = 7;

/// Trailing 7-day mean of daily minutes for `task`, plus `offset`.
///
/// The window is `as_of - 6 ..= as_of`; days without records count as 0, so
/// the divisor is always 7. The result is the expected fill time of the
/// progress indicator for a new session.
pub fn rolling_average(records: &[Record], task: TaskLabel, as_of: NaiveDate, offset: f64) -> f64 {
    let from = window_start(as_of, ROLLING_WINDOW_DAYS);

    let total: i64 = records
        .iter()
        .filter(|r| r.is_task(task) && r.date >= from && r.date <= as_of)
        .map(|r| r.duration_minutes)
        .sum();

    total as f64 / ROLLING_WINDOW_DAYS as f64 + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ROLLING_OFFSET_MINUTES as OFFSET;
    use chrono::{Duration, NaiveTime};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rec(date: NaiveDate, task: &str, minutes: i64) -> Record {
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        Record::new(date, task, t, t, minutes)
    }

    #[test]
    fn empty_window_is_exactly_the_offset() {
        let records = vec![rec(day("2024-01-01"), "Secondary", 120)];
        assert_eq!(
            rolling_average(&records, TaskLabel::Main, day("2024-01-01"), OFFSET),
            OFFSET
        );
        assert_eq!(rolling_average(&[], TaskLabel::Main, day("2024-01-01"), OFFSET), OFFSET);
    }

    #[test]
    fn seven_days_of_an_hour_average_to_an_hour() {
        let day7 = day("2024-01-07");
        let records: Vec<Record> = (0..7)
            .map(|i| rec(day7 - Duration::days(i), "Main", 60))
            .collect();
        assert_eq!(rolling_average(&records, TaskLabel::Main, day7, OFFSET), 60.0 + OFFSET);
    }

    #[test]
    fn records_outside_the_window_are_ignored() {
        let as_of = day("2024-01-10");
        let records = vec![
            rec(day("2024-01-04"), "Main", 70), // first day of window
            rec(day("2024-01-03"), "Main", 500), // too old
            rec(day("2024-01-11"), "Main", 500), // future
            rec(day("2024-01-10"), "Main", 7),
            rec(day("2024-01-10"), "main", 500), // label mismatch
        ];
        assert_eq!(rolling_average(&records, TaskLabel::Main, as_of, 0.0), 11.0);
    }

    #[test]
    fn offset_is_a_tunable() {
        let records = vec![rec(day("2024-01-01"), "Main", 14)];
        assert_eq!(rolling_average(&records, TaskLabel::Main, day("2024-01-01"), 0.0), 2.0);
        assert_eq!(rolling_average(&records, TaskLabel::Main, day("2024-01-01"), 5.5), 7.5);
    }
}
