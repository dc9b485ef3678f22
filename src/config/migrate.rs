//! Config file maintenance: detect keys missing from older files and
//! rewrite them with defaults filled in.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Keys every current config file is expected to carry.
pub const EXPECTED_KEYS: [&str; 5] = [
    "log_file",
    "rolling_offset_minutes",
    "default_task",
    "default_period",
    "separator_char",
];

/// Keys from `EXPECTED_KEYS` absent in the YAML document `content`.
pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)?;
    let map = match yaml.as_mapping() {
        Some(m) => m,
        // Empty file parses as null: everything is missing
        None if yaml.is_null() => return Ok(EXPECTED_KEYS.to_vec()),
        None => return Err(AppError::Config("config root is not a mapping".into())),
    };

    Ok(EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Report missing keys of the config file at `path`.
pub fn check(path: &Path) -> AppResult<Vec<&'static str>> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    missing_keys(&content)
}

/// Rewrite the config file at `path` so it carries every expected key.
///
/// Returns `Ok(false)` when nothing had to change.
pub fn migrate(path: &Path) -> AppResult<bool> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let missing = missing_keys(&content)?;

    if missing.is_empty() {
        info("Configuration is up to date.");
        return Ok(false);
    }

    // Defaults are filled in by serde for every missing key
    let cfg: Config = if content.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(&content)?
    };

    let yaml = serde_yaml::to_string(&cfg)?;
    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;

    success(format!(
        "Configuration migrated, added: {}",
        missing.join(", ")
    ));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_absent_keys() {
        let missing = missing_keys("log_file: a.csv\ndefault_task: Main\n").unwrap();
        assert_eq!(
            missing,
            vec!["rolling_offset_minutes", "default_period", "separator_char"]
        );
    }

    #[test]
    fn migrate_fills_defaults_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasklog.conf");
        fs::write(&path, "log_file: /tmp/a.csv\n").unwrap();

        assert!(migrate(&path).unwrap());
        assert!(check(&path).unwrap().is_empty());
        assert!(!migrate(&path).unwrap());

        let cfg: Config = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.log_file, "/tmp/a.csv");
        assert_eq!(cfg.default_period, 7);
    }
}
