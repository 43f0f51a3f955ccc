use super::{open_pool, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::date::{display_stored, today};
use crate::core::entries;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};
use crate::utils::feet;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let pool = open_pool(cfg)?;
        let actor = session_store().require(&pool)?;
        let policy = cfg.edit_policy();
        let now = today();

        // Permission is checked before asking, so a refusal never prompts.
        let entry = entries::load_editable(&pool, &policy, &actor, now, *id, "delete")?;

        let prompt = format!(
            "Delete entry #{} ({} · {} · {} · {})? This action is irreversible.",
            id,
            display_stored(&entry.date),
            entry.crew,
            entry.kind,
            feet(u64::from(entry.feet))
        );

        if !*yes && !confirm(&prompt)? {
            info("Operation cancelled.");
            return Ok(());
        }

        entries::delete(&pool, &policy, &actor, now, *id)?;
        success(format!("Entry #{} has been deleted.", id));
    }

    Ok(())
}
