//! Flat CSV record store backing the time log.
//!
//! One record per line: `date,task,start,end,duration`. The file always
//! starts with that header row; files written without it (older versions)
//! are still read in full because the first row is only skipped when it is
//! the header.
//!
//! No locking: a single process is expected to own the file. Rewrites go
//! through a sibling temp file and a rename, which protects against a
//! half-written log but not against a concurrent append.

use crate::db::row::{from_row, to_row};
use crate::errors::AppResult;
use crate::models::record::Record;
use crate::utils::path::sidecar;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const HEADER: [&str; 5] = ["date", "task", "start", "end", "duration"];

/// A line of the log that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line: u64,
    pub content: String,
    pub reason: String,
}

/// Result of a tolerant read of the whole log.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub malformed: Vec<MalformedLine>,
}

impl LoadReport {
    pub fn warn_malformed(&self) {
        for bad in &self.malformed {
            warn!(line = bad.line, content = %bad.content, reason = %bad.reason, "skipping malformed log line");
        }
    }
}

pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the log (header only) if it does not exist yet.
    ///
    /// Returns `true` when the file was created. Existing content is never
    /// touched.
    pub fn ensure(&self) -> AppResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        self.ensure_parent()?;
        let file = File::create(&self.path)?;
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        wtr.write_record(HEADER)?;
        wtr.flush()?;

        debug!(path = %self.path.display(), "created time log");
        Ok(true)
    }

    /// Append one record at the end of the log.
    pub fn append(&self, record: &Record) -> AppResult<()> {
        self.ensure_parent()?;
        let needs_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let unterminated = !needs_header && !ends_with_newline(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // A hand-edited last line without its newline
        if unterminated {
            file.write_all(b"\n")?;
        }
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);

        if needs_header {
            wtr.write_record(HEADER)?;
        }
        wtr.write_record(to_row(record))?;
        wtr.flush()?;

        debug!(date = %record.date, task = %record.task, minutes = record.duration_minutes, "appended record");
        Ok(())
    }

    /// All well-formed records in file order; malformed lines are skipped
    /// with a warning. An absent log reads as empty.
    pub fn read_all(&self) -> AppResult<Vec<Record>> {
        let report = self.load()?;
        report.warn_malformed();
        Ok(report.records)
    }

    /// Read the whole log, collecting malformed lines instead of failing.
    pub fn load(&self) -> AppResult<LoadReport> {
        if !self.path.exists() {
            return Ok(LoadReport::default());
        }

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(&self.path)?;

        let mut report = LoadReport::default();
        let mut first = true;

        for result in rdr.records() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    report.malformed.push(MalformedLine {
                        line,
                        content: String::new(),
                        reason: e.to_string(),
                    });
                    first = false;
                    continue;
                }
            };

            if std::mem::take(&mut first) && is_header(&row) {
                continue;
            }

            let line = row.position().map(|p| p.line()).unwrap_or(0);
            match from_row(&row) {
                Ok(record) => report.records.push(record),
                Err(reason) => report.malformed.push(MalformedLine {
                    line,
                    content: row.iter().collect::<Vec<_>>().join(","),
                    reason,
                }),
            }
        }

        Ok(report)
    }

    /// Rewrite the whole log with exactly `records`, in the given order.
    pub fn replace_all(&self, records: &[Record]) -> AppResult<()> {
        self.ensure_parent()?;
        let tmp = sidecar(&self.path, "csv.tmp");

        {
            let file = File::create(&tmp)?;
            let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
            wtr.write_record(HEADER)?;
            for record in records {
                wtr.write_record(to_row(record))?;
            }
            wtr.flush()?;
            let file = wtr
                .into_inner()
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(count = records.len(), "rewrote time log");
        Ok(())
    }

    /// Remove the most recently appended record and return it.
    ///
    /// With zero or one record the log is reset to empty; an empty or
    /// absent log is a no-op that returns `None`.
    pub fn delete_last(&self) -> AppResult<Option<Record>> {
        let mut records = self.read_all()?;

        let removed = records.pop();
        if removed.is_none() && !self.exists() {
            return Ok(None);
        }

        if records.is_empty() {
            self.reset()?;
        } else {
            self.replace_all(&records)?;
        }

        Ok(removed)
    }

    /// Truncate the log to its header row.
    pub fn reset(&self) -> AppResult<()> {
        self.replace_all(&[])
    }

    fn ensure_parent(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

fn ends_with_newline(path: &Path) -> AppResult<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn is_header(row: &StringRecord) -> bool {
    row.len() == HEADER.len()
        && row
            .iter()
            .zip(HEADER.iter())
            .all(|(cell, h)| cell.eq_ignore_ascii_case(h))
}

/// Write raw text lines to `path`; used by tests to fake hand-edited logs.
#[cfg(test)]
pub(crate) fn write_raw(path: &Path, lines: &[&str]) {
    let mut f = File::create(path).unwrap();
    for l in lines {
        writeln!(f, "{l}").unwrap();
    }
}
