use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use super::task::TaskLabel;

/// One completed task session, as stored in the log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub date: NaiveDate,   // ⇔ column 0 ("YYYY-MM-DD")
    pub task: String,      // ⇔ column 1 ("Main" | "Secondary", not enforced)
    pub start: Option<NaiveTime>, // ⇔ column 2 ("HH:MM", empty if unknown)
    pub end: Option<NaiveTime>,   // ⇔ column 3 ("HH:MM", empty if unknown)
    pub duration_minutes: i64, // ⇔ column 4, authoritative on read
}

impl Record {
    pub fn new(
        date: NaiveDate,
        task: impl Into<String>,
        start: impl Into<Option<NaiveTime>>,
        end: impl Into<Option<NaiveTime>>,
        duration_minutes: i64,
    ) -> Self {
        Self {
            date,
            task: task.into(),
            start: start.into(),
            end: end.into(),
            duration_minutes,
        }
    }

    /// Build the record logged when a session stops.
    ///
    /// The record is dated on the stop day; the duration is the elapsed time
    /// rounded to the nearest minute.
    pub fn from_session(task: TaskLabel, started: NaiveDateTime, stopped: NaiveDateTime) -> Self {
        let seconds = (stopped - started).num_seconds();
        let duration = (seconds as f64 / 60.0).round() as i64;

        Self {
            date: stopped.date(),
            task: task.as_str().to_string(),
            start: Some(to_minute(started.time())),
            end: Some(to_minute(stopped.time())),
            duration_minutes: duration,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        hh_mm(self.start)
    }

    pub fn end_str(&self) -> String {
        hh_mm(self.end)
    }

    pub fn is_task(&self, task: TaskLabel) -> bool {
        task.matches(&self.task)
    }
}

/// `HH:MM`, or an empty cell for a missing time.
fn hh_mm(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

/// Drop seconds: the log stores hour:minute only.
fn to_minute(t: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn session_duration_is_rounded_to_minutes() {
        let r = Record::from_session(
            TaskLabel::Main,
            dt("2024-03-10 09:00:10"),
            dt("2024-03-10 09:30:45"),
        );
        assert_eq!(r.duration_minutes, 31);
        assert_eq!(r.start_str(), "09:00");
        assert_eq!(r.end_str(), "09:30");
        assert_eq!(r.start, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(r.task, "Main");
    }

    #[test]
    fn missing_times_render_as_empty_cells() {
        let r = Record::new(
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            "Main",
            None,
            None,
            45,
        );
        assert_eq!(r.start_str(), "");
        assert_eq!(r.end_str(), "");
    }

    #[test]
    fn session_across_midnight_is_dated_on_stop_day() {
        let r = Record::from_session(
            TaskLabel::Secondary,
            dt("2024-03-10 23:50:00"),
            dt("2024-03-11 00:20:00"),
        );
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(r.duration_minutes, 30);
    }
}
