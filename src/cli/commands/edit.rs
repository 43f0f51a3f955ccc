use super::{open_pool, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::date::{display_stored, parse_input_date, to_storage_string, today};
use crate::core::entries;
use crate::db::entries::get_entry;
use crate::errors::AppResult;
use crate::models::EntryUpdate;
use crate::models::entry::parse_feet;
use crate::ui::messages::success;
use crate::utils::feet as fmt_feet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        crew,
        kind,
        feet,
    } = cmd
    {
        let pool = open_pool(cfg)?;
        let actor = session_store().require(&pool)?;
        let current = get_entry(&pool, *id)?;

        let update = EntryUpdate {
            date: match date {
                Some(d) => to_storage_string(parse_input_date(d)?),
                None => current.date.clone(),
            },
            crew: crew.clone().unwrap_or_else(|| current.crew.clone()),
            kind: kind.clone().unwrap_or_else(|| current.kind.clone()),
            feet: match feet {
                Some(f) => parse_feet(f)?,
                None => current.feet,
            },
        };

        let updated = entries::edit(&pool, &cfg.edit_policy(), &actor, today(), *id, &update)?;

        success(format!(
            "Entry #{} updated: {} · {} · {} · {}",
            id,
            display_stored(&updated.date),
            updated.crew,
            updated.kind,
            fmt_feet(u64::from(updated.feet))
        ));
    }

    Ok(())
}
