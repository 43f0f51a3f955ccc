use super::{open_pool, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::utils::path::resolve_output;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        session_store().require_admin(&pool)?;
        let dest = resolve_output(file)?;
        BackupLogic::backup(&pool, cfg, &dest, *compress, *force)?;
    }

    Ok(())
}
