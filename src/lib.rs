//! tasklog library root.
//! Exposes the CLI parser, the high-level `run()` function and the internal
//! modules (store, aggregation, session timer, views).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing::debug;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let as_of = cli.as_of.as_deref();

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Track { .. } => cli::commands::track::handle(&cli.command, cfg),
        Commands::Today => cli::commands::today::handle(cfg, as_of),
        Commands::Chart { .. } => cli::commands::chart::handle(&cli.command, cfg, as_of),
        Commands::Average { .. } => cli::commands::average::handle(&cli.command, cfg, as_of),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg, as_of),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    utils::logging::init_logging();

    // Config is loaded once and handed to every command
    let mut cfg = Config::load()?;

    if let Some(custom_log) = &cli.log {
        cfg.log_file = Config::resolve_log_path(custom_log)
            .to_string_lossy()
            .to_string();
    }

    debug!(log = %cfg.log_file, "configuration loaded");
    dispatch(&cli, &cfg)
}
