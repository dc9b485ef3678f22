use crate::core::calculator::period::PeriodSummary;
use crate::models::record::Record;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Everything the views show, computed in one pass over the log.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub as_of: NaiveDate,
    pub today_totals: BTreeMap<String, i64>,
    pub today_entries: Vec<Record>,
    pub chart: PeriodSummary,
}
