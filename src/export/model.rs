// src/export/model.rs

use crate::models::record::Record;
use serde::Serialize;

/// Flat export shape: same columns, same order as the time log.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub date: String,
    pub task: String,
    pub start: String,
    pub end: String,
    pub duration: i64,
}

impl From<&Record> for RecordExport {
    fn from(r: &Record) -> Self {
        Self {
            date: r.date_str(),
            task: r.task.clone(),
            start: r.start_str(),
            end: r.end_str(),
            duration: r.duration_minutes,
        }
    }
}

/// Header for CSV / XLSX
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["date", "task", "start", "end", "duration"]
}
