//! Path utilities: expand ~, derive sidecar files next to the log.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// `time_log.csv` → `time_log.<suffix>` in the same directory.
pub fn sidecar(log_path: &Path, suffix: &str) -> PathBuf {
    let stem = log_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "time_log".to_string());
    log_path.with_file_name(format!("{stem}.{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sidecar_keeps_directory() {
        let p = sidecar(Path::new("/tmp/data/time_log.csv"), "audit.csv");
        assert_eq!(p, PathBuf::from("/tmp/data/time_log.audit.csv"));
    }
}
