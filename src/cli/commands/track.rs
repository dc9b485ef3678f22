use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::ApplicationState;
use crate::db::store::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::view::{progress_view, render_progress, render_today, today_view};
use crate::utils::clock::SystemClock;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// Run one session in the foreground.
///
/// The progress line is redrawn every second; Enter (or end of input) stops
/// the session and logs it. Interrupting the process loses the session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Track { task } = cmd {
        let store = LogStore::new(cfg.log_path());
        let mut state = ApplicationState::new(store, SystemClock, cfg)?;

        if let Some(t) = task {
            state.select_task(*t);
        }

        let session = state.start_session()?;
        info(format!("Tracking {}. Press Enter to stop.", session.task));
        println!(
            "{}",
            progress_view(&session, session.started_at).target
        );

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut line = String::new();
            // EOF and read errors stop the session too
            let _ = io::stdin().lock().read_line(&mut line);
            let _ = tx.send(());
        });

        let mut stdout = io::stdout();
        loop {
            let view = progress_view(&session, state.now());
            write!(stdout, "\r{}", render_progress(&view))?;
            stdout.flush()?;

            match rx.recv_timeout(TICK) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        writeln!(stdout)?;
        debug!("stop requested");

        let record = state.stop_session()?;
        success(format!(
            "Logged {} mins of {} ({}-{}).",
            record.duration_minutes,
            record.task,
            record.start_str(),
            record.end_str()
        ));

        if let Some(dashboard) = state.dashboard() {
            print!("{}", render_today(&today_view(dashboard), cfg.separator()));
        }
    }
    Ok(())
}
