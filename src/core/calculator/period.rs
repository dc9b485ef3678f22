use crate::models::period::ChartPeriod;
use crate::models::record::Record;
use crate::models::task::TaskLabel;
use crate::utils::date::trailing_days;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub minutes: i64,
}

/// Per-day totals of one task over a trailing window, oldest day first.
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub task: TaskLabel,
    pub period: ChartPeriod,
    pub as_of: NaiveDate,
    pub days: Vec<DayTotal>,
}

impl PeriodSummary {
    pub fn total(&self) -> i64 {
        self.days.iter().map(|d| d.minutes).sum()
    }

    /// Mean of the daily totals (days without records included as 0).
    pub fn average(&self) -> f64 {
        if self.days.is_empty() {
            return 0.0;
        }
        self.total() as f64 / self.days.len() as f64
    }

    pub fn max(&self) -> i64 {
        self.days.iter().map(|d| d.minutes).max().unwrap_or(0)
    }
}

pub fn period_totals(
    records: &[Record],
    task: TaskLabel,
    period: ChartPeriod,
    as_of: NaiveDate,
) -> PeriodSummary {
    let mut buckets: BTreeMap<NaiveDate, i64> = trailing_days(as_of, period.days())
        .into_iter()
        .map(|d| (d, 0))
        .collect();

    for r in records.iter().filter(|r| r.is_task(task)) {
        if let Some(total) = buckets.get_mut(&r.date) {
            *total += r.duration_minutes;
        }
    }

    PeriodSummary {
        task,
        period,
        as_of,
        // BTreeMap iterates in ascending date order
        days: buckets
            .into_iter()
            .map(|(date, minutes)| DayTotal { date, minutes })
            .collect(),
    }
}
