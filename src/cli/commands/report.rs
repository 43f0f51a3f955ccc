use super::{build_filter, open_pool, resolve_range, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::entries::list_matching;
use crate::core::report::{Report, print_report};
use crate::errors::{AppError, AppResult};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        timeframe,
        filter,
        json,
    } = cmd
    {
        let (from, to) = resolve_range(*timeframe, filter, cfg)?;
        let entry_filter = build_filter(filter, Some(from), Some(to));

        let pool = open_pool(cfg)?;
        session_store().require(&pool)?;
        let rows = list_matching(&pool, &entry_filter)?;

        let report = Report::build(&rows, from, to, cfg.bucket_width)?;

        if *json {
            let out = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_report(&report, from, to, &cfg.separator_char);
        }
    }

    Ok(())
}
