//! `crew` and `type`: both lookup tables share one handler.

use super::{open_pool, session_store};
use crate::cli::parser::{Commands, ReferenceAction};
use crate::config::Config;
use crate::db::log::audit;
use crate::db::reference;
use crate::errors::AppResult;
use crate::models::ReferenceKind;
use crate::models::reference::normalize_color;
use crate::ui::messages::{info, success};
use crate::utils::colors::swatch;
use crate::utils::table::{Column, Table};

fn op(kind: ReferenceKind, verb: &str) -> String {
    match kind {
        ReferenceKind::Crew => format!("crew_{}", verb),
        ReferenceKind::Type => format!("type_{}", verb),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (kind, action) = match cmd {
        Commands::Crew { action } => (ReferenceKind::Crew, action),
        Commands::Type { action } => (ReferenceKind::Type, action),
        _ => return Ok(()),
    };

    let pool = open_pool(cfg)?;
    let store = session_store();

    match action {
        ReferenceAction::List => {
            store.require(&pool)?;
            let items = reference::list(&pool, kind)?;
            if items.is_empty() {
                info(format!("No {} defined.", kind.table()));
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::left(kind.label()),
                Column::left("Color"),
                Column::left(""),
            ])
            .with_separator(&cfg.separator_char);
            for item in &items {
                table.add_row(vec![item.name.clone(), item.color.clone(), swatch(&item.color)]);
            }
            println!("{}", table.render());
        }

        ReferenceAction::Add { name, color } => {
            let admin = store.require_admin(&pool)?;
            reference::add(&pool, kind, name, color)?;
            audit(
                &pool.conn,
                &op(kind, "add"),
                name.trim(),
                &format!("Added with color {} by {}", color, admin.username()),
            );
            success(format!("{} '{}' added.", kind.label(), name.trim()));
        }

        ReferenceAction::Remove { name } => {
            let admin = store.require_admin(&pool)?;
            reference::remove(&pool, kind, name)?;
            audit(
                &pool.conn,
                &op(kind, "del"),
                name,
                &format!("Removed by {}", admin.username()),
            );
            success(format!("{} '{}' removed.", kind.label(), name));
        }

        ReferenceAction::Color { name, color } => {
            let admin = store.require_admin(&pool)?;
            reference::recolor(&pool, kind, name, color)?;
            let color = normalize_color(color)?;
            audit(
                &pool.conn,
                &op(kind, "color"),
                name,
                &format!("Color set to {} by {}", color, admin.username()),
            );
            success(format!("{} '{}' is now {} {}", kind.label(), name, color, swatch(&color)));
        }
    }

    Ok(())
}
