//! Line-based prompts on stdin.

use crate::errors::AppResult;
use std::io::{self, BufRead, Write};

/// Print `prompt` and read one line. EOF yields an empty string; the line
/// ending is kept so callers can decide how strict to be.
pub fn ask_line(prompt: &str) -> AppResult<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

/// `[y/N]` question; anything but `y`/`yes` means no.
pub fn ask_yes_no(question: &str) -> AppResult<bool> {
    let answer = ask_line(&format!("{question} [y/N]: "))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
