use crate::cli::commands::{open_state, warn_skipped};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::{CONFIRM_WORD, DeleteLogic, DeleteScope, is_confirmed};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_line;
use crate::ui::view::{render_today, today_view};

pub fn handle(cmd: &Commands, cfg: &Config, as_of: Option<&str>) -> AppResult<()> {
    if let Commands::Del { today, all, last } = cmd {
        let mut state = open_state(cfg, as_of)?;

        let scope = match (*today, *all, *last) {
            (true, _, _) => DeleteScope::Day(state.today()),
            (_, true, _) => DeleteScope::All,
            _ => DeleteScope::Last,
        };

        // Rewrites keep well-formed records only
        if !matches!(scope, DeleteScope::All) {
            state.refresh()?;
            warn_skipped(&state);
        }

        warning(format!(
            "This will delete {}. This action is irreversible.",
            scope.describe()
        ));
        let answer = ask_line(&format!("Type '{}' to confirm: ", CONFIRM_WORD))?;

        if !is_confirmed(&answer) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = DeleteLogic::apply(state.store(), scope)?;
        if removed == 0 {
            info("Nothing to delete.");
        } else {
            success(format!("Deleted {} record(s).", removed));
        }

        // Views are recomputed from the rewritten log
        let dashboard = state.refresh()?;
        print!("{}", render_today(&today_view(dashboard), cfg.separator()));
    }
    Ok(())
}
