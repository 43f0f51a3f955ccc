use super::{build_filter, open_pool, parse_bounds, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::date::{display_stored, today};
use crate::core::entries::list_visible;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::colors::editable_marker;
use crate::utils::feet;
use crate::utils::table::{Column, Table};

/// Audit view: visible entries after filtering, with the editable marker.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, json } = cmd {
        let (from, to) = parse_bounds(filter)?;
        let entry_filter = build_filter(filter, from, to);

        let pool = open_pool(cfg)?;
        let actor = session_store().require(&pool)?;
        let (rows, total) = list_visible(&pool, &actor, &entry_filter)?;

        if *json {
            let out = serde_json::to_string_pretty(&rows)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        if rows.is_empty() {
            info("No entries match the selected filters.");
        } else {
            let policy = cfg.edit_policy();
            let now = today();

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Date"),
                Column::left("User"),
                Column::left("Crew"),
                Column::left("Type"),
                Column::right("Feet"),
                Column::left("Edit"),
            ])
            .with_separator(&cfg.separator_char);

            for e in &rows {
                table.add_row(vec![
                    e.id.map(|id| id.to_string()).unwrap_or_default(),
                    display_stored(&e.date),
                    e.username.clone(),
                    e.crew.clone(),
                    e.kind.clone(),
                    feet(u64::from(e.feet)),
                    editable_marker(policy.can_edit(e, &actor, now)),
                ]);
            }

            println!("{}", table.render());
        }

        println!("Showing {} of {} entries", rows.len(), total);
    }

    Ok(())
}
