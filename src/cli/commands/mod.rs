pub mod average;
pub mod chart;
pub mod config;
pub mod del;
pub mod export;
pub mod import;
pub mod init;
pub mod log;
pub mod today;
pub mod track;

use crate::config::Config;
use crate::core::session::ApplicationState;
use crate::db::store::LogStore;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use crate::utils::clock::{Clock, FixedClock, SystemClock};
use crate::utils::date;

/// Clock for the views: the wall clock, or the `--as-of` day at the
/// current time of day.
pub(crate) fn view_clock(as_of: Option<&str>) -> AppResult<Box<dyn Clock>> {
    match as_of {
        None => Ok(Box::new(SystemClock)),
        Some(s) => {
            let day = date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
            let now = SystemClock.now();
            Ok(Box::new(FixedClock::new(day.and_time(now.time()))))
        }
    }
}

/// Application state over the configured log, with `as_of` as today.
pub(crate) fn open_state(
    cfg: &Config,
    as_of: Option<&str>,
) -> AppResult<ApplicationState<Box<dyn Clock>>> {
    let store = LogStore::new(cfg.log_path());
    ApplicationState::new(store, view_clock(as_of)?, cfg)
}

/// One-line notice when the last refresh left malformed lines out.
pub(crate) fn warn_skipped<C: Clock>(state: &ApplicationState<C>) {
    let n = state.skipped_lines();
    if n > 0 {
        warning(format!(
            "Skipped {} malformed line(s) in {}",
            n,
            state.store().path().display()
        ));
    }
}
