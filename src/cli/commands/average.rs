use crate::cli::commands::view_clock;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::rolling::ROLLING_WINDOW_DAYS;
use crate::core::logic::Core;
use crate::db::store::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::clock::Clock;
use crate::utils::colors::{RESET, color_for_task};
use crate::utils::formatting::format_progress;

pub fn handle(cmd: &Commands, cfg: &Config, as_of: Option<&str>) -> AppResult<()> {
    if let Commands::Average { task } = cmd {
        let today = view_clock(as_of)?.now().date();
        let records = LogStore::new(cfg.log_path()).read_all()?;
        let averages = Core::rolling_averages(&records, today, cfg.rolling_offset_minutes);

        header(format!(
            "Rolling {}-day average as of {} (offset +{} mins)",
            ROLLING_WINDOW_DAYS, today, cfg.rolling_offset_minutes
        ));

        for (label, minutes) in averages
            .iter()
            .filter(|(label, _)| task.is_none_or(|t| t == **label))
        {
            println!(
                "  {}{:<10}{} {}",
                color_for_task(label.as_str()),
                label,
                RESET,
                format_progress(*minutes)
            );
        }
    }
    Ok(())
}
