use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate: run_migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            if !path.exists() {
                warning(format!("No configuration file at {}", path.display()));
            } else {
                let missing = migrate::check(&path)?;
                if missing.is_empty() {
                    success("Configuration file is complete.");
                } else {
                    warning(format!("Missing keys: {}", missing.join(", ")));
                    info("Run `tasklog config --migrate` to add them with default values.");
                }
            }
        }

        if *run_migrate {
            migrate::migrate(&path)?;
        }

        if *edit_config {
            edit(&path, editor.as_deref());
        }
    }

    Ok(())
}

/// Open the config file in the requested editor, falling back to the
/// platform default.
fn edit(path: &std::path::Path, requested: Option<&str>) {
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor = requested.unwrap_or(&default_editor);

    match Command::new(editor).arg(path).status() {
        Ok(s) if s.success() => {
            success(format!("Configuration file edited using '{}'", editor));
            return;
        }
        _ => warning(format!(
            "Editor '{}' not available, falling back to '{}'",
            editor, default_editor
        )),
    }

    match Command::new(&default_editor).arg(path).status() {
        Ok(s) if s.success() => success(format!(
            "Configuration file edited using fallback '{}'",
            default_editor
        )),
        _ => error(format!(
            "Failed to edit configuration file using fallback '{}'",
            default_editor
        )),
    }
}
