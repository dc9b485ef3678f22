use crate::core::calculator::{period, rolling, today};
use crate::models::dashboard::Dashboard;
use crate::models::period::ChartPeriod;
use crate::models::record::Record;
use crate::models::task::TaskLabel;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct Core;

impl Core {
    pub fn build_dashboard(
        records: &[Record],
        as_of: NaiveDate,
        chart_task: TaskLabel,
        chart_period: ChartPeriod,
    ) -> Dashboard {
        Dashboard {
            as_of,
            today_totals: today::today_totals(records, as_of),
            today_entries: today::entries_for_day(records, as_of),
            chart: period::period_totals(records, chart_task, chart_period, as_of),
        }
    }

    /// Rolling averages for both tasks, as shown by `average`.
    pub fn rolling_averages(
        records: &[Record],
        as_of: NaiveDate,
        offset: f64,
    ) -> BTreeMap<TaskLabel, f64> {
        TaskLabel::ALL
            .iter()
            .map(|t| (*t, rolling::rolling_average(records, *t, as_of, offset)))
            .collect()
    }
}
