use crate::errors::{AppError, AppResult};
use crate::models::period::ChartPeriod;
use crate::models::task::TaskLabel;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

/// Padding added to the 7-day rolling average when sizing the progress
/// indicator. Kept at the value the tool has always used; override with
/// `rolling_offset_minutes` in the config file.
pub const DEFAULT_ROLLING_OFFSET_MINUTES: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_rolling_offset")]
    pub rolling_offset_minutes: f64,
    #[serde(default = "default_task")]
    pub default_task: String,
    #[serde(default = "default_period")]
    pub default_period: u32,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_log_file() -> String {
    Config::log_file_path().to_string_lossy().to_string()
}
fn default_rolling_offset() -> f64 {
    DEFAULT_ROLLING_OFFSET_MINUTES
}
fn default_task() -> String {
    TaskLabel::Main.as_str().to_string()
}
fn default_period() -> u32 {
    7
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            rolling_offset_minutes: default_rolling_offset(),
            default_task: default_task(),
            default_period: default_period(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("tasklog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".tasklog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tasklog.conf")
    }

    /// Return the default path of the time log
    pub fn log_file_path() -> PathBuf {
        Self::config_dir().join("time_log.csv")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Resolved path of the time log (`~` expanded).
    pub fn log_path(&self) -> PathBuf {
        expand_tilde(&self.log_file)
    }

    /// Task used when none is given on the command line.
    pub fn task(&self) -> AppResult<TaskLabel> {
        TaskLabel::from_user_str(&self.default_task)
            .ok_or_else(|| AppError::InvalidTask(self.default_task.clone()))
    }

    /// Chart period used when none is given on the command line.
    pub fn period(&self) -> AppResult<ChartPeriod> {
        ChartPeriod::from_days(self.default_period)
            .ok_or_else(|| AppError::InvalidPeriod(self.default_period.to_string()))
    }

    /// Resolve a `--log` value: `~` expanded, relative paths land in the
    /// config directory.
    pub fn resolve_log_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Write this configuration to the standard config file.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir()).map_err(|_| AppError::ConfigSave)?;
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration directory and config file.
    ///
    /// A custom log path (from `--log`) is stored in the new config; with
    /// `is_test` the config file is left untouched.
    pub fn init_all(custom_log: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let log_path = match custom_log {
            Some(name) => Self::resolve_log_path(&name),
            None => Self::log_file_path(),
        };

        let config = Config {
            log_file: log_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save()?;
        }

        Ok(config)
    }
}
