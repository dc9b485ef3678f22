use crate::db::log::{AuditEntry, read_entries};
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    let re = ANSI.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid regex"));
    re.replace_all(s, "").into_owned()
}

/// Colour of an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "import" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `op (target)`, cut to `MAX_OP_WIDTH` visible characters, op coloured.
fn op_target(entry: &AuditEntry) -> String {
    let visible = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if visible.chars().count() > MAX_OP_WIDTH {
        let mut s: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(log_path: &Path) -> AppResult<()> {
        let entries = read_entries(log_path)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rendered: Vec<String> = entries.iter().map(op_target).collect();
        let op_w = rendered
            .iter()
            .map(|s| strip_ansi(s).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries.len().to_string().len();
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        println!("📜 Internal log:\n");

        for (i, (entry, op)) in entries.iter().zip(&rendered).enumerate() {
            // Padding on the visible width, escape codes excluded
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(op).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                i + 1,
                entry.date,
                op,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(op: &str, target: &str) -> AuditEntry {
        AuditEntry {
            date: "2024-01-01T09:00:00+01:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn op_target_is_truncated_on_visible_text() {
        let long = "x".repeat(80);
        let s = strip_ansi(&op_target(&entry("del", &long)));
        assert_eq!(s.chars().count(), MAX_OP_WIDTH);
        assert!(s.starts_with("del (x"));
        assert!(s.ends_with("..."));

        assert_eq!(strip_ansi(&op_target(&entry("init", ""))), "init");
    }
}
