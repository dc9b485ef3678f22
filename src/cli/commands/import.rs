use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::store::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { primary, secondary } = cmd {
        let store = LogStore::new(cfg.log_path());
        let report = ImportLogic::run(&store, Path::new(primary), secondary.as_deref().map(Path::new))?;

        if report.secondary_empty {
            info("Secondary file has no rows; only the primary file was imported.");
        }
        for row in &report.dropped {
            warning(format!("{} line {}: dropped, {}", row.source, row.line, row.reason));
        }

        success(format!(
            "Imported {} record(s) into {} ({} dropped).",
            report.imported,
            store.path().display(),
            report.dropped.len()
        ));
    }
    Ok(())
}
