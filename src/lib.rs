//! rAttendance library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::context::AppContext;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        cmd => {
            let mut ctx = AppContext::open(cfg, cli.test || cfg.test_mode)?;
            match cmd {
                Commands::Login { .. }
                | Commands::Register { .. }
                | Commands::Logout { .. }
                | Commands::Me => cli::commands::auth::handle(cmd, &mut ctx).await,
                Commands::Locations | Commands::Qr { .. } => {
                    cli::commands::qr::handle(cmd, &mut ctx).await
                }
                Commands::Scan { .. } => cli::commands::scan::handle(cmd, &mut ctx).await,
                _ => cli::commands::records::handle(cmd, &mut ctx).await,
            }
        }
    }
}

/// Parse the command line, load the config and apply the global overrides.
pub fn prepare() -> AppResult<(Cli, Config)> {
    let cli = Cli::parse();
    let mut cfg = Config::load()?;

    if let Some(url) = &cli.api {
        cfg.api_base_url = url.clone();
    }
    if let Some(session) = &cli.session {
        cfg.session_file = session.clone();
    }

    Ok((cli, cfg))
}

/// Entry point used by main.rs
pub async fn run(cli: Cli, cfg: Config) -> AppResult<()> {
    dispatch(&cli, &cfg).await
}
