use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_log;
use crate::db::store::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates the config directory, the config file (unless `--test`) and the
/// time log with its header row. An existing log is left untouched.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.log.clone(), cli.test)?;
    let store = LogStore::new(cfg.log_path());

    println!("⚙️  Initializing tasklog…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗂️  Time log   : {}", store.path().display());

    if init_log(&store)? {
        success(format!("Time log created at {}", store.path().display()));
    } else {
        info(format!("Time log already present at {}", store.path().display()));
    }

    println!("🎉 tasklog initialization completed!");
    Ok(())
}
