//! The logged-in identity, persisted between invocations.
//!
//! The file only caches who logged in; every command re-reads the account
//! from the database so a removed user or a changed role takes effect
//! immediately.

use crate::db::pool::DbPool;
use crate::db::users::find_user;
use crate::errors::{AppError, AppResult};
use crate::models::Identity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identity: Identity,
    pub logged_in_at: String,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the cached session. A missing or unreadable file means nobody
    /// is logged in.
    pub fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, identity: &Identity) -> AppResult<Session> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let session = Session {
            identity: identity.clone(),
            logged_in_at: chrono::Local::now().to_rfc3339(),
        };
        let json = serde_json::to_string_pretty(&session)
            .map_err(|e| AppError::Other(format!("session encode: {}", e)))?;
        fs::write(&self.path, json)?;
        Ok(session)
    }

    /// Remove the session. Returns whether one existed.
    pub fn clear(&self) -> AppResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }

    /// Identity of the logged-in user, refreshed from the database.
    pub fn current(&self, pool: &DbPool) -> AppResult<Option<Identity>> {
        let Some(session) = self.load() else {
            return Ok(None);
        };

        match find_user(pool, session.identity.username())? {
            Some(user) => Ok(Some(user.identity())),
            None => {
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn require(&self, pool: &DbPool) -> AppResult<Identity> {
        self.current(pool)?.ok_or(AppError::NotLoggedIn)
    }

    pub fn require_admin(&self, pool: &DbPool) -> AppResult<Identity> {
        let identity = self.require(pool)?;
        if !identity.is_admin() {
            return Err(AppError::Forbidden(format!(
                "'{}' is not an administrator",
                identity.username()
            )));
        }
        Ok(identity)
    }
}
