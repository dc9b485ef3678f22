use crate::models::record::Record;
use crate::models::task::TaskLabel;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Minutes per task label for records dated `today`.
///
/// Both known labels are always present; unknown labels found on that day
/// are kept as they appear in the log.
pub fn today_totals(records: &[Record], today: NaiveDate) -> BTreeMap<String, i64> {
    let mut totals: BTreeMap<String, i64> = TaskLabel::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), 0))
        .collect();

    for r in records.iter().filter(|r| r.date == today) {
        *totals.entry(r.task.clone()).or_insert(0) += r.duration_minutes;
    }

    totals
}

/// Records logged on `day`, in log order.
pub fn entries_for_day(records: &[Record], day: NaiveDate) -> Vec<Record> {
    records.iter().filter(|r| r.date == day).cloned().collect()
}
