use crate::cli::commands::{open_state, warn_skipped};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::view::{render_today, today_view};

pub fn handle(cfg: &Config, as_of: Option<&str>) -> AppResult<()> {
    let mut state = open_state(cfg, as_of)?;
    let dashboard = state.refresh()?;

    print!("{}", render_today(&today_view(dashboard), cfg.separator()));
    warn_skipped(&state);
    Ok(())
}
