//! One handler per subcommand, plus the helpers they share.

pub mod account;
pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod reference;
pub mod report;
pub mod user;

use crate::cli::parser::FilterArgs;
use crate::config::Config;
use crate::core::date::{TimeFrame, parse_input_date, to_storage_string, today};
use crate::core::filter::EntryFilter;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::session::SessionStore;
use crate::ui::messages::ask;
use chrono::NaiveDate;

/// Open the configured database with an up-to-date schema.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn session_store() -> SessionStore {
    SessionStore::new(Config::session_file())
}

pub(crate) fn password_or_prompt(password: &Option<String>) -> AppResult<String> {
    match password {
        Some(p) => Ok(p.clone()),
        None => ask("Password"),
    }
}

/// Parsed `--from`/`--to`.
pub(crate) fn parse_bounds(args: &FilterArgs) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let from = args.from.as_deref().map(parse_input_date).transpose()?;
    let to = args.to.as_deref().map(parse_input_date).transpose()?;
    if let (Some(f), Some(t)) = (from, to) {
        check_order(f, t)?;
    }
    Ok((from, to))
}

fn check_order(from: NaiveDate, to: NaiveDate) -> AppResult<()> {
    if from > to {
        return Err(AppError::InvalidRange(format!(
            "start {} is after its end {}",
            to_storage_string(from),
            to_storage_string(to)
        )));
    }
    Ok(())
}

/// Reporting range: the preset's bounds, each overridden by an explicit
/// `--from`/`--to`. Bounds alone imply a custom range.
pub(crate) fn resolve_range(
    timeframe: Option<TimeFrame>,
    args: &FilterArgs,
    cfg: &Config,
) -> AppResult<(NaiveDate, NaiveDate)> {
    let (from_arg, to_arg) = parse_bounds(args)?;

    let frame = match timeframe {
        Some(t) => t,
        None if from_arg.is_some() || to_arg.is_some() => TimeFrame::Custom,
        None => cfg.timeframe()?,
    };

    // A custom range with only `--to` ends there rather than today.
    let anchor = match (frame, to_arg) {
        (TimeFrame::Custom, Some(t)) => t,
        _ => today(),
    };
    let (from, to) = frame.bounds(anchor);
    let (from, to) = (from_arg.unwrap_or(from), to_arg.unwrap_or(to));

    check_order(from, to)?;
    Ok((from, to))
}

/// Filter from the shared flags, with explicit bounds.
pub(crate) fn build_filter(
    args: &FilterArgs,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> EntryFilter {
    let mut filter = EntryFilter::new().range(from, to);
    if let Some(s) = &args.search {
        filter = filter.search(s.clone());
    }
    if let Some(c) = &args.crew {
        filter = filter.crew(c.clone());
    }
    if let Some(k) = &args.kind {
        filter = filter.kind(k.clone());
    }
    filter
}
