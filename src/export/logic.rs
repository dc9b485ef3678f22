// src/export/logic.rs

use crate::db::store::LogStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::record::Record;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

/// High level export of the time log.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the records of the log.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and
    ///   their `start:end` forms
    ///
    /// Returns the number of exported records; nothing is written when the
    /// selection is empty.
    pub fn export(
        store: &LogStore,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let mut records = select(store.read_all()?, bounds);
        if records.is_empty() {
            warning("No records found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        // Stable: same-day records keep log order
        records.sort_by_key(|r| r.date);
        debug!(format = format.as_str(), count = records.len(), "exporting");

        match format {
            ExportFormat::Csv => export_csv(&flatten(&records), path)?,
            ExportFormat::Json => export_json(&flatten(&records), path)?,
            ExportFormat::Xlsx => export_xlsx(&records, path)?,
        }

        Ok(records.len())
    }
}

fn select(records: Vec<Record>, bounds: Option<(NaiveDate, NaiveDate)>) -> Vec<Record> {
    match bounds {
        None => records,
        Some((from, to)) => records
            .into_iter()
            .filter(|r| r.date >= from && r.date <= to)
            .collect(),
    }
}

fn flatten(records: &[Record]) -> Vec<RecordExport> {
    records.iter().map(RecordExport::from).collect()
}
