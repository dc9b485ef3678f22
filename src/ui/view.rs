//! Terminal views.
//!
//! Each view is a plain struct built from aggregator output (`Dashboard`,
//! `PeriodSummary`, `ActiveSession`), and a `render_*` function turns it into
//! text. Building a view never reads the log; rendering never computes.

use crate::core::calculator::period::PeriodSummary;
use crate::core::session::ActiveSession;
use crate::models::dashboard::Dashboard;
use crate::models::task::TaskLabel;
use crate::utils::colors::{GREY, RESET, color_for_task, colorize_duration};
use crate::utils::formatting::{format_axis, format_hm, format_progress};
use crate::utils::table::{Column, Table};
use chrono::NaiveDateTime;

/// Columns used by the chart bars.
pub const CHART_WIDTH: usize = 48;
/// Cells of the progress bar.
pub const PROGRESS_WIDTH: usize = 30;

const Y_TICK_MINUTES: i64 = 30;
const Y_MIN_TOP: i64 = 180;

// ---------------------------
// Today
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TodayView {
    pub date: String,
    /// `(label, "1h 30m")`, known labels first.
    pub totals: Vec<(String, String)>,
    /// Date, task, start, end, duration.
    pub entries: Vec<[String; 5]>,
}

pub fn today_view(dashboard: &Dashboard) -> TodayView {
    TodayView {
        date: dashboard.as_of.format("%d-%b-%y").to_string(),
        totals: dashboard
            .today_totals
            .iter()
            .map(|(label, minutes)| (label.clone(), format_hm(*minutes)))
            .collect(),
        entries: dashboard
            .today_entries
            .iter()
            .map(|r| {
                [
                    r.date.format("%d-%b-%y").to_string(),
                    r.task.clone(),
                    r.start_str(),
                    r.end_str(),
                    format!("{} mins", r.duration_minutes),
                ]
            })
            .collect(),
    }
}

pub fn render_today(view: &TodayView, separator: char) -> String {
    let mut out = format!("Today's totals ({})\n", view.date);

    for (label, value) in &view.totals {
        out.push_str(&format!(
            "  {}{:<10}{} {}\n",
            color_for_task(label),
            label,
            RESET,
            colorize_duration(value)
        ));
    }
    out.push('\n');

    if view.entries.is_empty() {
        out.push_str("No entries for today.\n");
        return out;
    }

    let mut table = Table::new(
        ["Date", "Task", "Start", "End", "Duration"]
            .into_iter()
            .map(Column::new)
            .collect(),
        separator,
    );
    for row in &view.entries {
        table.add_row(row.to_vec());
    }
    out.push_str(&table.render());
    out
}

// ---------------------------
// Chart
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    /// `DD-Mon`
    pub label: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub title: String,
    pub task: TaskLabel,
    pub bars: Vec<ChartBar>,
    /// Top of the y axis in minutes.
    pub y_max: i64,
    /// One `HH:MM` label every 30 minutes, from zero to `y_max`.
    pub y_ticks: Vec<String>,
    pub average: f64,
    pub average_label: String,
}

pub fn chart_view(summary: &PeriodSummary) -> ChartView {
    let max = summary.max();
    let y_max = (((max / Y_TICK_MINUTES) + 1) * Y_TICK_MINUTES).max(Y_MIN_TOP);
    let average = summary.average();

    ChartView {
        title: format!("{} Task Duration Over Selected Period", summary.task),
        task: summary.task,
        bars: summary
            .days
            .iter()
            .map(|d| ChartBar {
                label: d.date.format("%d-%b").to_string(),
                minutes: d.minutes,
            })
            .collect(),
        y_max,
        y_ticks: (0..=y_max)
            .step_by(Y_TICK_MINUTES as usize)
            .map(|m| format_axis(m as f64))
            .collect(),
        average,
        average_label: format!("Avg: {}", format_axis(average)),
    }
}

/// Column of `minutes` on a bar `CHART_WIDTH` wide scaled to `y_max`.
fn column(minutes: f64, y_max: i64) -> usize {
    if y_max <= 0 {
        return 0;
    }
    ((minutes / y_max as f64) * CHART_WIDTH as f64).round().clamp(0.0, CHART_WIDTH as f64) as usize
}

pub fn render_chart(view: &ChartView) -> String {
    let colour = color_for_task(view.task.as_str());
    let avg_col = column(view.average, view.y_max);
    let gutter = " ".repeat(7);

    let mut out = format!("{}\n\n", view.title);

    for bar in &view.bars {
        let len = column(bar.minutes as f64, view.y_max);
        let cells: String = (0..CHART_WIDTH)
            .map(|i| {
                if i < len {
                    '█'
                } else if i == avg_col {
                    '┊'
                } else {
                    ' '
                }
            })
            .collect();

        out.push_str(&format!(
            "{} │{}{}{} {}\n",
            bar.label,
            colour,
            cells,
            RESET,
            format_axis(bar.minutes as f64)
        ));
    }

    out.push_str(&format!("{gutter}└{}\n", "─".repeat(CHART_WIDTH)));
    out.push_str(&format!("{gutter} {}\n", tick_line(view)));
    out.push_str(&format!("{GREY}{}{RESET}\n", view.average_label));
    out
}

/// Axis labels placed under their column, skipping those that would overlap.
fn tick_line(view: &ChartView) -> String {
    let label_width = 5;
    let mut line = vec![' '; CHART_WIDTH + label_width];
    let mut next_free = 0;

    for (i, tick) in view.y_ticks.iter().enumerate() {
        let col = column((i as i64 * Y_TICK_MINUTES) as f64, view.y_max);
        if col < next_free || col + label_width > line.len() {
            continue;
        }
        for (offset, ch) in tick.chars().enumerate() {
            line[col + offset] = ch;
        }
        next_free = col + label_width + 1;
    }

    line.into_iter().collect::<String>().trim_end().to_string()
}

// ---------------------------
// Progress
// ---------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    pub task: String,
    /// 0.0 ..= 1.0
    pub ratio: f64,
    pub elapsed: String,
    /// `Filling Time: …`
    pub target: String,
}

pub fn progress_view(session: &ActiveSession, now: NaiveDateTime) -> ProgressView {
    ProgressView {
        task: session.task.to_string(),
        ratio: session.fill_ratio(now),
        elapsed: format_progress(session.elapsed_minutes(now)),
        target: format!("Filling Time: {}", format_progress(session.target_minutes)),
    }
}

pub fn render_progress(view: &ProgressView) -> String {
    let filled = (view.ratio * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);

    format!(
        "{}{}{} [{}{}] {:>3}%  {} ({})",
        color_for_task(&view.task),
        view.task,
        RESET,
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled),
        (view.ratio * 100.0).round() as i64,
        view.elapsed,
        view.target
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logic::Core;
    use crate::models::period::ChartPeriod;
    use crate::models::record::Record;
    use chrono::{NaiveDate, NaiveTime};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::new(d("2024-01-01"), "Main", t("09:00"), t("09:30"), 30),
            Record::new(d("2024-01-01"), "Secondary", t("10:00"), t("10:15"), 15),
        ]
    }

    #[test]
    fn today_view_lists_totals_and_entries() {
        let dash = Core::build_dashboard(&sample(), d("2024-01-01"), TaskLabel::Main, ChartPeriod::Week);
        let view = today_view(&dash);

        assert_eq!(view.date, "01-Jan-24");
        assert_eq!(
            view.totals,
            vec![
                ("Main".to_string(), "0h 30m".to_string()),
                ("Secondary".to_string(), "0h 15m".to_string()),
            ]
        );
        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.entries[1][4], "15 mins");

        let text = render_today(&view, '-');
        assert!(text.contains("0h 30m"));
        assert!(text.contains("10:00"));
    }

    #[test]
    fn empty_day_renders_a_notice() {
        let dash = Core::build_dashboard(&sample(), d("2024-01-05"), TaskLabel::Main, ChartPeriod::Week);
        let text = render_today(&today_view(&dash), '-');
        assert!(text.contains("No entries for today."));
    }

    #[test]
    fn chart_axis_has_a_floor_and_half_hour_ticks() {
        let dash = Core::build_dashboard(&sample(), d("2024-01-03"), TaskLabel::Main, ChartPeriod::Week);
        let view = chart_view(&dash.chart);

        assert_eq!(view.title, "Main Task Duration Over Selected Period");
        assert_eq!(view.bars.len(), 7);
        assert_eq!(view.bars[4].label, "01-Jan");
        assert_eq!(view.bars[4].minutes, 30);
        assert_eq!(view.y_max, 180);
        assert_eq!(view.y_ticks.first().unwrap(), "00:00");
        assert_eq!(view.y_ticks.last().unwrap(), "03:00");
        assert_eq!(view.y_ticks.len(), 7);
        // 30 / 7 minutes
        assert_eq!(view.average_label, "Avg: 00:04");
    }

    #[test]
    fn chart_axis_grows_past_the_floor() {
        let records = vec![Record::new(d("2024-01-01"), "Main", t("08:00"), t("12:10"), 250)];
        let dash = Core::build_dashboard(&records, d("2024-01-01"), TaskLabel::Main, ChartPeriod::Week);
        let view = chart_view(&dash.chart);
        assert_eq!(view.y_max, 270);

        let text = render_chart(&view);
        assert!(text.contains("04:10"));
        assert!(text.contains("Avg: 00:35"));
    }

    #[test]
    fn progress_bar_is_capped() {
        let session = ActiveSession {
            task: TaskLabel::Main,
            started_at: d("2024-01-01").and_time(t("09:00")),
            target_minutes: 70.0,
        };

        let view = progress_view(&session, d("2024-01-01").and_time(t("09:35")));
        assert!((view.ratio - 0.5).abs() < 1e-9);
        assert_eq!(view.elapsed, "35 mins");
        assert_eq!(view.target, "Filling Time: 1 hr 10 mins");
        assert!(render_progress(&view).contains(" 50%"));

        let view = progress_view(&session, d("2024-01-01").and_time(t("11:00")));
        assert_eq!(view.ratio, 1.0);
        assert!(render_progress(&view).contains("100%"));
    }
}
