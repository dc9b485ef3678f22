//! Internal audit log: one CSV line per mutating operation, kept next to
//! the time log as `<stem>.audit.csv`.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::path::sidecar;
use chrono::Local;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn audit_path(log_path: &Path) -> PathBuf {
    sidecar(log_path, "audit.csv")
}

/// Write an internal log line for an operation on the time log.
pub fn ttlog(log_path: &Path, operation: &str, target: &str, message: &str) -> AppResult<()> {
    // Timestamp locale, ISO 8601
    let now = Local::now().to_rfc3339();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(audit_path(log_path))?;
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
    wtr.write_record([now.as_str(), operation, target, message])?;
    wtr.flush()?;

    Ok(())
}

/// Same as `ttlog`, but a failure only produces a warning.
pub fn ttlog_quiet(log_path: &Path, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(log_path, operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}

/// All audit entries, oldest first. Missing file → empty.
pub fn read_entries(log_path: &Path) -> AppResult<Vec<AuditEntry>> {
    let path = audit_path(log_path);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut entries = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or("").to_string();
        entries.push(AuditEntry {
            date: field(0),
            operation: field(1),
            target: field(2),
            message: field(3),
        });
    }
    Ok(entries)
}
