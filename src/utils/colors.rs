/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";

/// Main → blue, Secondary → magenta, anything else uncolored.
pub fn color_for_task(label: &str) -> &'static str {
    match label {
        "Main" => BLUE,
        "Secondary" => MAGENTA,
        _ => RESET,
    }
}

/// Grey out empty durations ("0h 0m", "0 mins", "00:00").
pub fn colorize_duration(value: &str) -> String {
    let v = value.trim();
    if v == "0h 0m" || v == "0 mins" || v == "00:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
