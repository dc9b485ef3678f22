//! Rebuild the time log from older exports.
//!
//! Sources are spreadsheets (first worksheet) or delimited text files whose
//! columns follow the log order (`date, task, start, end, duration`). A
//! primary source is required, a secondary one is optional. Rows without a
//! date are dropped; the others are cleaned, merged, sorted by date and
//! written over the current log in a single `replace_all`. Nothing is
//! written unless at least one row survives.

use crate::db::log::ttlog_quiet;
use crate::db::row::parse_duration;
use crate::db::store::LogStore;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::utils::date::parse_log_date;
use crate::utils::excel::{serial_to_date, serial_to_datetime};
use crate::utils::time::{extract_time, minutes_between};
use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs;
use std::path::Path;
use tracing::debug;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A source row that did not make it into the new log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub source: String,
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub primary_rows: usize,
    pub secondary_rows: usize,
    pub imported: usize,
    pub dropped: Vec<DroppedRow>,
    /// Set when the secondary source existed but had no rows.
    pub secondary_empty: bool,
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn run(store: &LogStore, primary: &Path, secondary: Option<&Path>) -> AppResult<ImportReport> {
        let mut report = ImportReport::default();

        let primary_rows = read_source(primary)?;
        report.primary_rows = primary_rows.len();
        let (mut records, mut dropped) = parse_rows(&primary_rows, &display_name(primary));

        if let Some(path) = secondary {
            let rows = read_source(path)?;
            report.secondary_rows = rows.len();
            report.secondary_empty = rows.is_empty();

            let (more, more_dropped) = parse_rows(&rows, &display_name(path));
            records.extend(more);
            dropped.extend(more_dropped);
        }

        report.dropped = dropped;

        if records.is_empty() {
            return Err(AppError::Import(format!(
                "no importable row found ({} row(s) dropped); the time log was not modified",
                report.dropped.len()
            )));
        }

        // Stable: rows of the same day keep their source order
        records.sort_by_key(|r| r.date);
        store.replace_all(&records)?;
        report.imported = records.len();

        debug!(imported = report.imported, dropped = report.dropped.len(), "import finished");
        ttlog_quiet(
            store.path(),
            "import",
            &display_name(primary),
            &format!(
                "Imported {} record(s), dropped {}",
                report.imported,
                report.dropped.len()
            ),
        );

        Ok(report)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every row of a source as positional text cells, with its line
/// (or worksheet row) number.
pub fn read_source(path: &Path) -> AppResult<Vec<(u64, StringRecord)>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        read_workbook(path)
    } else {
        read_delimited(path, &ext)
    }
}

/// First worksheet of a workbook.
fn read_workbook(path: &Path) -> AppResult<Vec<(u64, StringRecord)>> {
    let fail = |e: &dyn std::fmt::Display| AppError::Import(format!("{}: {}", path.display(), e));

    let mut workbook = open_workbook_auto(path).map_err(|e| fail(&e))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(r) => r.map_err(|e| fail(&e))?,
        None => return Err(fail(&"workbook has no worksheet")),
    };

    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let rows = range
        .rows()
        .enumerate()
        .map(|(i, cells)| {
            // Keep columns positional when the used range does not start at A
            let mut texts = vec![String::new(); first_col as usize];
            texts.extend(
                cells
                    .iter()
                    .enumerate()
                    .map(|(c, cell)| cell_text(first_col as usize + c, cell)),
            );
            (first_row as u64 + i as u64 + 1, StringRecord::from(texts))
        })
        .collect();
    Ok(rows)
}

/// Text of a worksheet cell, in a shape `parse_row` understands. Date and
/// time cells become `YYYY-MM-DD HH:MM:SS` / `HH:MM:SS`.
fn cell_text(col: usize, cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        // Start / end stored as plain numbers are day fractions
        Data::Float(f) if col == 2 || col == 3 => {
            serial_text(*f).unwrap_or_else(|| f.to_string())
        }
        Data::Float(f) => f.to_string(),
        Data::DateTime(dt) => serial_text(dt.as_f64()).unwrap_or_default(),
        _ => String::new(),
    }
}

fn serial_text(serial: f64) -> Option<String> {
    let dt = serial_to_datetime(serial)?;
    let fmt = if serial < 1.0 { "%H:%M:%S" } else { "%Y-%m-%d %H:%M:%S" };
    Some(dt.format(fmt).to_string())
}

/// Delimited text: a tab for `.tsv` files, otherwise `;` or `,` depending
/// on the first line.
fn read_delimited(path: &Path, ext: &str) -> AppResult<Vec<(u64, StringRecord)>> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Import(format!("cannot read {}: {}", path.display(), e)))?;

    let delimiter = if ext == "tsv" {
        b'\t'
    } else {
        sniff_delimiter(content.lines().next().unwrap_or(""))
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| AppError::Import(format!("{}: {}", path.display(), e)))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        rows.push((line, row));
    }
    Ok(rows)
}

fn sniff_delimiter(first_line: &str) -> u8 {
    if first_line.contains(';') && !first_line.contains(',') {
        b';'
    } else {
        b','
    }
}

/// Clean raw rows into records, keeping the reasons for every drop.
pub fn parse_rows(rows: &[(u64, StringRecord)], source: &str) -> (Vec<Record>, Vec<DroppedRow>) {
    let mut records = Vec::new();
    let mut dropped = Vec::new();

    for (line, row) in rows {
        match parse_row(row) {
            Ok(r) => records.push(r),
            Err(reason) => dropped.push(DroppedRow {
                source: source.to_string(),
                line: *line,
                reason,
            }),
        }
    }

    (records, dropped)
}

/// One source row. Only the date is mandatory: times missing from the
/// cells are left empty and the task is kept as written. The duration
/// falls back to end - start; a row with neither is dropped.
fn parse_row(row: &StringRecord) -> Result<Record, String> {
    let cell = |i: usize| row.get(i).unwrap_or("").trim();

    let date = parse_import_date(cell(0)).ok_or_else(|| format!("no parseable date in '{}'", cell(0)))?;

    let start = extract_time(cell(2));
    let end = extract_time(cell(3));

    let duration = match (parse_duration(cell(4)), start, end) {
        (Some(d), _, _) => d,
        (None, Some(s), Some(e)) => {
            let m = minutes_between(s, e);
            // Sessions running past midnight
            if m < 0 { m + 24 * 60 } else { m }
        }
        _ => return Err(format!("no duration in '{}' and no start/end to derive it", cell(4))),
    };

    Ok(Record::new(date, cell(1), start, end, duration))
}

/// Dates as found in hand-kept spreadsheets.
///
/// Accepts the log formats, `YYYY/MM/DD`, `DD/MM/YYYY`, `DD-Mon-YY` and
/// spreadsheet serial day numbers (days since 1899-12-30).
pub fn parse_import_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(d) = parse_log_date(s) {
        return Some(d);
    }

    let formats = ["%Y/%m/%d", "%d/%m/%Y", "%d-%b-%y", "%d-%b-%Y"];
    if let Some(d) = formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }

    serial_to_date(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::write_raw;
    use chrono::NaiveTime;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn import_dates_in_several_shapes() {
        assert_eq!(parse_import_date("2024-03-01"), Some(d("2024-03-01")));
        assert_eq!(parse_import_date("2024-03-01 00:00:00"), Some(d("2024-03-01")));
        assert_eq!(parse_import_date("2024/03/01"), Some(d("2024-03-01")));
        assert_eq!(parse_import_date("01/03/2024"), Some(d("2024-03-01")));
        assert_eq!(parse_import_date("01-Mar-24"), Some(d("2024-03-01")));
        assert_eq!(parse_import_date("45352"), Some(d("2024-03-01")));
        assert_eq!(parse_import_date("date"), None);
        assert_eq!(parse_import_date(""), None);
        assert_eq!(parse_import_date("-3"), None);
    }

    #[test]
    fn merges_sorts_and_replaces_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("old.csv");
        let secondary = dir.path().join("older.csv");
        write_raw(
            &primary,
            &[
                "Date,Task,Start,End,Duration",
                "2024-03-02,Main,1900-01-01 09:00:00,1900-01-01 09:45:00,45",
                ",Main,09:00,10:00,60",
                "2024-03-01,Secondary,10:00,10:20,",
            ],
        );
        write_raw(&secondary, &["2024-02-28;Main;08:00;08:30;30.0"]);

        let store = LogStore::new(dir.path().join("time_log.csv"));
        store
            .append(&Record::new(
                d("2020-01-01"),
                "Main",
                NaiveTime::from_hms_opt(1, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
                60,
            ))
            .unwrap();

        let report = ImportLogic::run(&store, &primary, Some(&secondary)).unwrap();
        assert_eq!(report.primary_rows, 4);
        assert_eq!(report.secondary_rows, 1);
        assert_eq!(report.imported, 3);
        assert_eq!(report.dropped.len(), 2);
        assert_eq!(report.dropped[0].line, 1);

        let records = store.read_all().unwrap();
        let dates: Vec<String> = records.iter().map(|r| r.date_str()).collect();
        assert_eq!(dates, vec!["2024-02-28", "2024-03-01", "2024-03-02"]);
        assert_eq!(records[0].duration_minutes, 30);
        // Missing duration falls back to end - start
        assert_eq!(records[1].duration_minutes, 20);
        assert_eq!(records[2].start_str(), "09:00");
    }

    #[test]
    fn nothing_usable_leaves_the_log_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("bad.csv");
        write_raw(&primary, &["not,a,date,at,all", "x,y,z,w,v"]);

        let store = LogStore::new(dir.path().join("time_log.csv"));
        store.ensure().unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = ImportLogic::run(&store, &primary, None).unwrap_err();
        assert!(matches!(err, AppError::Import(_)));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn empty_secondary_is_flagged_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("old.csv");
        let secondary = dir.path().join("empty.csv");
        write_raw(&primary, &["2024-03-02,Main,09:00,09:45,45"]);
        write_raw(&secondary, &[]);

        let store = LogStore::new(dir.path().join("time_log.csv"));
        let report = ImportLogic::run(&store, &primary, Some(&secondary)).unwrap();
        assert!(report.secondary_empty);
        assert_eq!(report.imported, 1);
    }

    #[test]
    fn rows_without_times_keep_their_minutes() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("old.csv");
        write_raw(
            &primary,
            &[
                "2024-03-02,Main,,,45",
                "2024-03-02,,nan,nan,5",
                "2024-03-03,Main,,,",
            ],
        );

        let store = LogStore::new(dir.path().join("time_log.csv"));
        let report = ImportLogic::run(&store, &primary, None).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].line, 3);

        let records = store.read_all().unwrap();
        assert_eq!(records[0], Record::new(d("2024-03-02"), "Main", None, None, 45));
        assert_eq!(records[1].task, "");
        assert_eq!(records[1].duration_minutes, 5);

        let main: i64 = records
            .iter()
            .filter(|r| r.task == "Main")
            .map(|r| r.duration_minutes)
            .sum();
        assert_eq!(main, 45);
    }

    #[test]
    fn exported_workbook_imports_back() {
        use crate::export::{ExportFormat, ExportLogic};

        let dir = tempfile::tempdir().unwrap();
        let source = LogStore::new(dir.path().join("source.csv"));
        let t = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        let records = vec![
            Record::new(d("2024-03-01"), "Main", t("09:00"), t("09:30"), 30),
            Record::new(d("2024-03-01"), "Secondary", t("17:45"), t("18:00"), 15),
            Record::new(d("2024-03-04"), "Main", None, None, 50),
        ];
        source.replace_all(&records).unwrap();

        let workbook = dir.path().join("old.xlsx");
        ExportLogic::export(
            &source,
            ExportFormat::Xlsx,
            workbook.to_str().unwrap(),
            None,
            true,
        )
        .unwrap();

        let store = LogStore::new(dir.path().join("time_log.csv"));
        let report = ImportLogic::run(&store, &workbook, None).unwrap();
        // Header row is the only drop
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(report.dropped[0].line, 1);
        assert_eq!(store.read_all().unwrap(), records);
    }
}
