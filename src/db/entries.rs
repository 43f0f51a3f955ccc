//! Storage of production entries.

use crate::core::date::normalize_storage_string;
use crate::db::now_stamp;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Entry, EntryUpdate};
use rusqlite::{OptionalExtension, Result, Row, params};

const SELECT_ENTRY: &str = "SELECT id, date, crew, feet, type, username, created_at FROM entries";

pub fn map_row(row: &Row) -> Result<Entry> {
    let raw_date: String = row.get("date")?;
    // Legacy dash dates are presented in the canonical slash form.
    let date = normalize_storage_string(&raw_date).unwrap_or(raw_date);

    Ok(Entry {
        id: row.get("id")?,
        date,
        crew: row.get("crew")?,
        feet: row.get("feet")?,
        kind: row.get("type")?,
        username: row.get("username")?,
        created_at: row.get("created_at")?,
    })
}

/// All entries, newest date first.
pub fn list_entries(pool: &DbPool) -> AppResult<Vec<Entry>> {
    let mut stmt = pool
        .conn
        .prepare(&format!("{SELECT_ENTRY} ORDER BY replace(date, '-', '/') DESC, id DESC"))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_entry(pool: &DbPool, id: i64) -> AppResult<Entry> {
    pool.conn
        .query_row(&format!("{SELECT_ENTRY} WHERE id = ?1"), [id], map_row)
        .optional()?
        .ok_or(AppError::EntryNotFound(id))
}

/// Insert a new entry and return its id.
pub fn insert_entry(pool: &DbPool, entry: &Entry) -> AppResult<i64> {
    let created_at = entry.created_at.clone().unwrap_or_else(now_stamp);

    pool.conn.execute(
        "INSERT INTO entries (date, crew, feet, type, username, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.date,
            entry.crew,
            entry.feet,
            entry.kind,
            entry.username,
            created_at,
        ],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

/// Replace date, crew, type and feet of an existing entry.
pub fn update_entry(pool: &DbPool, id: i64, update: &EntryUpdate) -> AppResult<()> {
    let changed = pool.conn.execute(
        "UPDATE entries SET date = ?1, crew = ?2, type = ?3, feet = ?4 WHERE id = ?5",
        params![update.date, update.crew, update.kind, update.feet, id],
    )?;
    if changed == 0 {
        return Err(AppError::EntryNotFound(id));
    }
    Ok(())
}

pub fn delete_entry(pool: &DbPool, id: i64) -> AppResult<()> {
    let changed = pool.conn.execute("DELETE FROM entries WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::EntryNotFound(id));
    }
    Ok(())
}
