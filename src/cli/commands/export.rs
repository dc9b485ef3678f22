use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::LogStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let store = LogStore::new(cfg.log_path());
        ExportLogic::export(&store, *format, file, range.as_deref(), *force)?;
    }
    Ok(())
}
