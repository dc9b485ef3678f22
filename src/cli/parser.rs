use crate::export::ExportFormat;
use crate::models::period::ChartPeriod;
use crate::models::task::TaskLabel;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for tasklog
/// CLI application to time two tasks and chart their daily totals
#[derive(Parser)]
#[command(
    name = "tasklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple task timer: log Main/Secondary sessions to CSV and chart daily totals",
    long_about = None
)]
pub struct Cli {
    /// Override the time log path (useful for tests or a second log)
    #[arg(global = true, long = "log")]
    pub log: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Treat this day (YYYY-MM-DD) as today
    #[arg(global = true, long = "as-of", value_name = "DATE")]
    pub as_of: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the time log and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Time a session; press Enter to stop and log it
    Track {
        /// Task to time (defaults to `default_task` from the config)
        #[arg(value_enum)]
        task: Option<TaskLabel>,
    },

    /// Show today's totals and entries
    Today,

    /// Chart daily totals of a task over the last 7, 14 or 30 days
    Chart {
        #[arg(long, short, value_enum)]
        period: Option<ChartPeriod>,

        #[arg(long, short, value_enum)]
        task: Option<TaskLabel>,
    },

    /// Show the rolling 7-day average used as the session target
    Average {
        #[arg(long, short, value_enum)]
        task: Option<TaskLabel>,
    },

    /// Delete records (asks to type `reset`)
    #[command(group(
        ArgGroup::new("scope").required(true).args(["today", "all", "last"])
    ))]
    Del {
        #[arg(long = "today", help = "Delete every entry dated today")]
        today: bool,

        #[arg(long = "all", help = "Delete every entry")]
        all: bool,

        #[arg(long = "last", help = "Delete the most recent entry")]
        last: bool,
    },

    /// Rebuild the time log from older CSV exports
    Import {
        /// Primary source file (csv, tsv or a workbook such as .xlsx)
        primary: String,

        /// Optional secondary source, merged with the primary
        #[arg(long, value_name = "FILE")]
        secondary: Option<String>,
    },

    /// Export the time log
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal audit log")]
        print: bool,
    },
}
