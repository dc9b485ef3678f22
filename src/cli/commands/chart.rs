use crate::cli::commands::{open_state, warn_skipped};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::view::{chart_view, render_chart};

pub fn handle(cmd: &Commands, cfg: &Config, as_of: Option<&str>) -> AppResult<()> {
    if let Commands::Chart { period, task } = cmd {
        let mut state = open_state(cfg, as_of)?;

        if let Some(t) = task {
            state.chart_task = *t;
        }
        let period = period.unwrap_or(state.chart_period);
        let dashboard = state.select_chart_period(period)?;

        print!("{}", render_chart(&chart_view(&dashboard.chart)));
        warn_skipped(&state);
    }
    Ok(())
}
