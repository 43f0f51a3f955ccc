use super::{open_pool, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::date::{display_stored, parse_input_date};
use crate::core::entries;
use crate::errors::AppResult;
use crate::models::entry::parse_feet;
use crate::ui::messages::success;
use crate::utils::feet as fmt_feet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        crew,
        kind,
        feet,
    } = cmd
    {
        let date = parse_input_date(date)?;
        let feet = parse_feet(feet)?;

        let pool = open_pool(cfg)?;
        let actor = session_store().require(&pool)?;

        let entry = entries::submit(&pool, &actor, date, crew.as_deref(), kind, feet)?;

        success(format!(
            "Entry #{} saved: {} · {} · {} · {}",
            entry.id.unwrap_or_default(),
            display_stored(&entry.date),
            entry.crew,
            entry.kind,
            fmt_feet(u64::from(entry.feet))
        ));
    }

    Ok(())
}
