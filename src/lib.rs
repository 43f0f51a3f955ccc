//! prodlog library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod session;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Login { .. }
        | Commands::Logout
        | Commands::Whoami
        | Commands::Register { .. } => commands::account::handle(&cli.command, cfg),
        Commands::Add { .. } => commands::add::handle(&cli.command, cfg),
        Commands::List { .. } => commands::list::handle(&cli.command, cfg),
        Commands::Edit { .. } => commands::edit::handle(&cli.command, cfg),
        Commands::Del { .. } => commands::del::handle(&cli.command, cfg),
        Commands::Crew { .. } | Commands::Type { .. } => {
            commands::reference::handle(&cli.command, cfg)
        }
        Commands::User { .. } => commands::user::handle(&cli.command, cfg),
        Commands::Report { .. } => commands::report::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once (`init` writes it, so it may not exist yet)
    let mut cfg = match cli.command {
        Commands::Init { .. } => Config::default(),
        _ => Config::load()?,
    };

    // 3️⃣ command-line override of the DB path
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_database(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
