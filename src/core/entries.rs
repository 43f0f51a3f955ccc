//! Entry submission and the permission-checked edit/delete paths.

use crate::core::date::{from_storage_string, to_storage_string};
use crate::core::filter::EntryFilter;
use crate::core::permission::{EditPolicy, visible_entries};
use crate::db::entries as store;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::reference;
use crate::errors::{AppError, AppResult};
use crate::models::entry::validate_feet;
use crate::models::{Entry, EntryUpdate, Identity, ReferenceKind};
use chrono::NaiveDate;

fn check_reference(pool: &DbPool, crew: &str, kind: &str) -> AppResult<()> {
    reference::require(pool, ReferenceKind::Crew, crew)?;
    reference::require(pool, ReferenceKind::Type, kind)?;
    Ok(())
}

/// Record a new measurement owned by `actor`. Supervisors without an
/// explicit crew fall back to their own.
pub fn submit(
    pool: &DbPool,
    actor: &Identity,
    date: NaiveDate,
    crew: Option<&str>,
    kind: &str,
    feet: u32,
) -> AppResult<Entry> {
    let crew = crew
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or(actor.crew())
        .ok_or_else(|| AppError::InvalidName("a crew is required".into()))?;

    let mut entry = Entry::new(to_storage_string(date), crew, kind.trim(), feet, actor.username());
    entry.validate()?;
    check_reference(pool, &entry.crew, &entry.kind)?;

    let id = store::insert_entry(pool, &entry)?;
    entry.id = Some(id);

    audit(
        &pool.conn,
        "add",
        &format!("#{}", id),
        &format!(
            "{} ft {} / {} on {} by {}",
            entry.feet, entry.crew, entry.kind, entry.date, entry.username
        ),
    );

    Ok(entry)
}

/// Load an entry and check that `actor` may change it.
pub fn load_editable(
    pool: &DbPool,
    policy: &EditPolicy,
    actor: &Identity,
    today: NaiveDate,
    id: i64,
    action: &str,
) -> AppResult<Entry> {
    let entry = store::get_entry(pool, id)?;
    if !policy.can_edit(&entry, actor, today) {
        let reason = if entry.username != actor.username() {
            "it belongs to another user".to_string()
        } else if from_storage_string(&entry.date).is_none() {
            "its date cannot be read".to_string()
        } else {
            format!("it is older than {} days", policy.window_days)
        };
        return Err(AppError::Forbidden(format!(
            "cannot {} entry #{}: {}",
            action, id, reason
        )));
    }
    Ok(entry)
}

/// Replace date, crew, type and feet of an entry the actor may edit.
pub fn edit(
    pool: &DbPool,
    policy: &EditPolicy,
    actor: &Identity,
    today: NaiveDate,
    id: i64,
    update: &EntryUpdate,
) -> AppResult<Entry> {
    let before = load_editable(pool, policy, actor, today, id, "edit")?;

    let update = EntryUpdate {
        date: from_storage_string(&update.date)
            .map(to_storage_string)
            .ok_or_else(|| AppError::InvalidDate(update.date.clone()))?,
        crew: update.crew.trim().to_string(),
        kind: update.kind.trim().to_string(),
        feet: update.feet,
    };
    validate_feet(update.feet)?;
    check_reference(pool, &update.crew, &update.kind)?;

    store::update_entry(pool, id, &update)?;

    audit(
        &pool.conn,
        "edit",
        &format!("#{}", id),
        &format!(
            "{} {} {} {} ft → {} {} {} {} ft (by {})",
            before.date,
            before.crew,
            before.kind,
            before.feet,
            update.date,
            update.crew,
            update.kind,
            update.feet,
            actor.username()
        ),
    );

    store::get_entry(pool, id)
}

pub fn delete(
    pool: &DbPool,
    policy: &EditPolicy,
    actor: &Identity,
    today: NaiveDate,
    id: i64,
) -> AppResult<Entry> {
    let entry = load_editable(pool, policy, actor, today, id, "delete")?;
    store::delete_entry(pool, id)?;

    audit(
        &pool.conn,
        "del",
        &format!("#{}", id),
        &format!(
            "{} {} {} {} ft (owner {}, by {})",
            entry.date,
            entry.crew,
            entry.kind,
            entry.feet,
            entry.username,
            actor.username()
        ),
    );

    Ok(entry)
}

/// Entries the actor may see, narrowed by `filter`, newest first.
/// Returns `(matching, visible_total)`.
pub fn list_visible(
    pool: &DbPool,
    actor: &Identity,
    filter: &EntryFilter,
) -> AppResult<(Vec<Entry>, usize)> {
    let visible = visible_entries(&store::list_entries(pool)?, actor);
    let total = visible.len();
    Ok((filter.apply(&visible), total))
}

/// Every entry narrowed by `filter`, newest first. Reports and exports
/// cover the whole crew regardless of who is asking.
pub fn list_matching(pool: &DbPool, filter: &EntryFilter) -> AppResult<Vec<Entry>> {
    Ok(filter.apply(&store::list_entries(pool)?))
}
