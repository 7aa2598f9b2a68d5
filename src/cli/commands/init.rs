use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// Creates `~/.rattendance/` and a default configuration file. An existing
/// file is kept as is.
pub fn handle(cli: &Cli) -> AppResult<()> {
    info("Initializing rAttendance…");

    let (path, created) = Config::init_all(cli.api.as_deref())?;
    if created {
        success(format!("Config file: {}", path.display()));
    } else {
        info(format!("Config file already exists: {}", path.display()));
    }

    let cfg = Config::load()?;
    info(format!("API endpoint: {}", cfg.api_base_url));
    info(format!("Session file: {}", cfg.session_path().display()));

    success("rAttendance initialization completed!");
    Ok(())
}
