#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn tl() -> Command {
    cargo_bin_cmd!("tasklog")
}

/// Unique time log path inside the system temp dir; any previous log and
/// its audit sidecar are removed.
pub fn setup_test_log(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_tasklog.csv", name));
    fs::remove_file(&path).ok();
    fs::remove_file(path.with_file_name(format!("{}_tasklog.audit.csv", name))).ok();
    path.to_string_lossy().to_string()
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a log with the header row followed by `rows`.
pub fn seed_log(path: &str, rows: &[&str]) {
    let mut content = String::from("date,task,start,end,duration\n");
    for r in rows {
        content.push_str(r);
        content.push('\n');
    }
    fs::write(path, content).expect("write seed log");
}

/// Data rows of a log, header excluded.
pub fn log_rows(path: &str) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read log")
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// The two-record day used across tests.
pub const JAN_FIRST: [&str; 2] = [
    "2024-01-01,Main,09:00,09:30,30",
    "2024-01-01,Secondary,10:00,10:15,15",
];
