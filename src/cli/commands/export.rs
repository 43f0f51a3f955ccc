use super::{build_filter, open_pool, parse_bounds, resolve_range, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::path::resolve_output;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        timeframe,
        filter,
        force,
    } = cmd
    {
        let (from, to) = match timeframe {
            Some(_) => {
                let (f, t) = resolve_range(*timeframe, filter, cfg)?;
                (Some(f), Some(t))
            }
            None => parse_bounds(filter)?,
        };
        let entry_filter = build_filter(filter, from, to);
        let path = resolve_output(file)?;

        let pool = open_pool(cfg)?;
        session_store().require(&pool)?;

        ExportLogic::export(
            &pool,
            &entry_filter,
            *format,
            &path,
            from,
            to,
            *force,
        )?;
    }

    Ok(())
}
