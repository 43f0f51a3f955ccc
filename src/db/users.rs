//! Account storage. Hashing and policy live in `core::auth`.

use crate::db::now_stamp;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Role, User};
use rusqlite::{OptionalExtension, Result, Row, params};

fn map_row(row: &Row) -> Result<User> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid role: {}", role_str))),
        )
    })?;

    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password_hash: row.get("password")?,
        role,
        crew: row.get("crew")?,
        created_at: row.get("created_at")?,
    })
}

const SELECT_USER: &str = "SELECT id, username, password, role, crew, created_at FROM users";

pub fn list_users(pool: &DbPool) -> AppResult<Vec<User>> {
    let mut stmt = pool
        .conn
        .prepare(&format!("{SELECT_USER} ORDER BY username"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_users(pool: &DbPool) -> AppResult<i64> {
    Ok(pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

pub fn find_user(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
    Ok(pool
        .conn
        .query_row(
            &format!("{SELECT_USER} WHERE username = ?1"),
            [username],
            map_row,
        )
        .optional()?)
}

pub fn insert_user(pool: &DbPool, user: &User) -> AppResult<i64> {
    pool.conn.execute(
        "INSERT INTO users (username, password, role, crew, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            user.username,
            user.password_hash,
            user.role.to_db_str(),
            user.crew,
            user.created_at.clone().unwrap_or_else(now_stamp),
        ],
    )?;
    Ok(pool.conn.last_insert_rowid())
}

fn not_found(username: &str) -> AppError {
    AppError::NotFound(format!("User '{}'", username))
}

pub fn delete_user(pool: &DbPool, username: &str) -> AppResult<()> {
    let changed = pool
        .conn
        .execute("DELETE FROM users WHERE username = ?1", [username])?;
    if changed == 0 {
        return Err(not_found(username));
    }
    Ok(())
}

pub fn update_user_crew(pool: &DbPool, username: &str, crew: Option<&str>) -> AppResult<()> {
    let changed = pool.conn.execute(
        "UPDATE users SET crew = ?1 WHERE username = ?2",
        params![crew, username],
    )?;
    if changed == 0 {
        return Err(not_found(username));
    }
    Ok(())
}

pub fn update_user_password(pool: &DbPool, username: &str, password_hash: &str) -> AppResult<()> {
    let changed = pool.conn.execute(
        "UPDATE users SET password = ?1 WHERE username = ?2",
        params![password_hash, username],
    )?;
    if changed == 0 {
        return Err(not_found(username));
    }
    Ok(())
}
