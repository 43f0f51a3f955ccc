use super::{open_pool, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let pool = open_pool(cfg)?;
        session_store().require_admin(&pool)?;
        LogLogic::print_log(&pool, *limit)?;
    }

    Ok(())
}
