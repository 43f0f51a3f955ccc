//! Crews and work types: named, coloured lookup rows.

use crate::db::now_stamp;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::reference::{normalize_color, normalize_name};
use crate::models::{ReferenceItem, ReferenceKind};
use rusqlite::{OptionalExtension, params};

pub fn list(pool: &DbPool, kind: ReferenceKind) -> AppResult<Vec<ReferenceItem>> {
    let mut stmt = pool.conn.prepare(&format!(
        "SELECT id, name, color, created_at FROM {} ORDER BY name",
        kind.table()
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok(ReferenceItem {
            id: row.get(0)?,
            name: row.get(1)?,
            color: row.get(2)?,
            created_at: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn exists(pool: &DbPool, kind: ReferenceKind, name: &str) -> AppResult<bool> {
    let found: Option<i64> = pool
        .conn
        .query_row(
            &format!("SELECT id FROM {} WHERE name = ?1", kind.table()),
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Fail unless `name` is a known crew/type.
pub fn require(pool: &DbPool, kind: ReferenceKind, name: &str) -> AppResult<()> {
    if !exists(pool, kind, name)? {
        return Err(AppError::NotFound(format!("{} '{}'", kind.label(), name)));
    }
    Ok(())
}

pub fn add(pool: &DbPool, kind: ReferenceKind, name: &str, color: &str) -> AppResult<()> {
    let name = normalize_name(kind, name)?;
    let color = normalize_color(color)?;

    if exists(pool, kind, &name)? {
        return Err(AppError::Duplicate(format!("{} '{}'", kind.label(), name)));
    }

    pool.conn.execute(
        &format!(
            "INSERT INTO {} (name, color, created_at) VALUES (?1, ?2, ?3)",
            kind.table()
        ),
        params![name, color, now_stamp()],
    )?;
    Ok(())
}

pub fn remove(pool: &DbPool, kind: ReferenceKind, name: &str) -> AppResult<()> {
    let changed = pool.conn.execute(
        &format!("DELETE FROM {} WHERE name = ?1", kind.table()),
        [name],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("{} '{}'", kind.label(), name)));
    }
    Ok(())
}

pub fn recolor(pool: &DbPool, kind: ReferenceKind, name: &str, color: &str) -> AppResult<()> {
    let color = normalize_color(color)?;
    let changed = pool.conn.execute(
        &format!("UPDATE {} SET color = ?1 WHERE name = ?2", kind.table()),
        params![color, name],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound(format!("{} '{}'", kind.label(), name)));
    }
    Ok(())
}
