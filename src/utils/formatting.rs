//! Formatting utilities used for CLI and export outputs.

/// Split fractional minutes into whole hours and remaining whole minutes.
fn split_minutes(minutes: f64) -> (i64, i64) {
    let whole = minutes.floor() as i64;
    (whole.div_euclid(60), whole.rem_euclid(60))
}

/// Totals: `"1h 30m"`.
pub fn format_hm(minutes: i64) -> String {
    let (h, m) = split_minutes(minutes as f64);
    format!("{}h {}m", h, m)
}

/// Progress indicator: `"1 hr 10 mins"`, or `"45 mins"` under one hour.
pub fn format_progress(minutes: f64) -> String {
    let (h, m) = split_minutes(minutes);
    if h > 0 {
        format!("{} hr {} mins", h, m)
    } else {
        format!("{} mins", m)
    }
}

/// Chart axis: zero-padded `HH:MM`, hours not capped at 24.
pub fn format_axis(minutes: f64) -> String {
    let (h, m) = split_minutes(minutes);
    format!("{:02}:{:02}", h, m)
}
