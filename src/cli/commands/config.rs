use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success, warning};
use std::path::Path;
use std::process::Command;

/// `config --print` / `config --edit [--editor CMD]`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        header(format!("Configuration ({})", Config::config_file().display()));
        print!("{}", serde_yaml::to_string(cfg)?);
    }

    if *edit_config {
        let path = Config::config_file();
        if !path.exists() {
            let written = cfg.save()?;
            info(format!("Wrote defaults to {}", written.display()));
        }
        edit(&path, editor.as_deref())?;
    }

    Ok(())
}

fn system_editor() -> String {
    ["EDITOR", "VISUAL"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| {
            if cfg!(windows) { "notepad" } else { "nano" }.to_string()
        })
}

fn launch(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Try the requested editor first, then the system one.
fn edit(path: &Path, requested: Option<&str>) -> AppResult<()> {
    let fallback = system_editor();

    if let Some(wanted) = requested {
        if launch(wanted, path) {
            success(format!("Configuration saved with '{wanted}'"));
            return Ok(());
        }
        warning(format!("'{wanted}' failed, trying '{fallback}'"));
    }

    if launch(&fallback, path) {
        success(format!("Configuration saved with '{fallback}'"));
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "Could not open {} with '{fallback}'",
            path.display()
        )))
    }
}
