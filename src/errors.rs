//! Unified application error type.
//! Every module (db, core, cli, export) returns AppError so the binary can
//! surface a single, consistent message for any failure.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid date: {0} (expected YYYY/MM/DD or YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Invalid feet value: {0} (must be a positive whole number)")]
    InvalidFeet(String),

    #[error("Invalid color: {0} (expected #RRGGBB)")]
    InvalidColor(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error(
        "Password too weak: use at least 8 characters with a letter, a number and a symbol"
    )]
    WeakPassword,

    // ---------------------------
    // Storage lookups
    // ---------------------------
    #[error("{0} already exists")]
    Duplicate(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Entry #{0} not found")]
    EntryNotFound(i64),

    // ---------------------------
    // Identity / permissions
    // ---------------------------
    #[error("Invalid username or password")]
    AuthFailed,

    #[error("Not logged in: run `prodlog login <username>` first")]
    NotLoggedIn,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
