// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
pub(crate) mod range;
mod xlsx;

pub use logic::ExportLogic;
pub use model::RecordExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Common completion message for every export format.
pub(crate) fn notify_export_success(label: &str, count: usize, path: &Path) {
    success(format!(
        "{label} export completed: {count} record(s) → {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}
