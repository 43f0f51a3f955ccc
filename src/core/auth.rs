//! Accounts: password policy, hashing, login.

use crate::db::pool::DbPool;
use crate::db::{reference, users};
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, ReferenceKind, Role, User};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use regex::Regex;
use sha2::Sha256;
use std::sync::OnceLock;

pub const DEFAULT_ADMIN: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123";

const HASH_SCHEME: &str = "pbkdf2";
const HASH_ROUNDS: u32 = 100_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

fn symbol_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#).expect("static symbol regex")
    })
}

/// At least 8 characters with a letter, a digit and a symbol.
pub fn is_password_valid(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && symbol_regex().is_match(password)
}

fn derive(password: &str, salt: &[u8], rounds: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut key);
    key
}

/// `pbkdf2$<rounds>$<salt b64>$<key b64>`
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key = derive(password, &salt, HASH_ROUNDS);
    format!(
        "{}${}${}${}",
        HASH_SCHEME,
        HASH_ROUNDS,
        B64.encode(salt),
        B64.encode(key)
    )
}

/// Check a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    let [scheme, rounds, salt, key] = parts.as_slice() else {
        return false;
    };
    if *scheme != HASH_SCHEME {
        return false;
    }
    let (Ok(rounds), Ok(salt), Ok(key)) = (
        rounds.parse::<u32>(),
        B64.decode(salt),
        B64.decode(key),
    ) else {
        return false;
    };
    derive(password, &salt, rounds).as_slice() == key.as_slice()
}

fn normalize_username(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(AppError::InvalidName(format!(
            "username '{}' must be non-empty and without spaces",
            raw
        )));
    }
    Ok(name.to_string())
}

/// Create an account. The crew is only kept for supervisors and must be a
/// known crew.
pub fn create_user(
    pool: &DbPool,
    username: &str,
    password: &str,
    role: Role,
    crew: Option<&str>,
) -> AppResult<User> {
    let username = normalize_username(username)?;

    if !is_password_valid(password) {
        return Err(AppError::WeakPassword);
    }

    if users::find_user(pool, &username)?.is_some() {
        return Err(AppError::Duplicate(format!("User '{}'", username)));
    }

    let crew = match role {
        Role::Supervisor => crew.map(str::trim).filter(|c| !c.is_empty()),
        Role::Admin => None,
    };
    if let Some(c) = crew {
        reference::require(pool, ReferenceKind::Crew, c)?;
    }

    let mut user = User {
        id: None,
        username,
        password_hash: hash_password(password),
        role,
        crew: crew.map(str::to_string),
        created_at: None,
    };
    user.id = Some(users::insert_user(pool, &user)?);
    Ok(user)
}

pub fn authenticate(pool: &DbPool, username: &str, password: &str) -> AppResult<Identity> {
    match users::find_user(pool, username.trim())? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user.identity()),
        _ => Err(AppError::AuthFailed),
    }
}

/// Create an account and log it in straight away.
pub fn register(
    pool: &DbPool,
    username: &str,
    password: &str,
    role: Role,
    crew: Option<&str>,
) -> AppResult<Identity> {
    let user = create_user(pool, username, password, role, crew)?;
    Ok(user.identity())
}

pub fn change_password(pool: &DbPool, username: &str, new_password: &str) -> AppResult<()> {
    if !is_password_valid(new_password) {
        return Err(AppError::WeakPassword);
    }
    users::update_user_password(pool, username, &hash_password(new_password))
}

pub fn change_crew(pool: &DbPool, username: &str, crew: Option<&str>) -> AppResult<()> {
    let user = users::find_user(pool, username)?
        .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))?;
    if user.role == Role::Admin && crew.is_some() {
        return Err(AppError::Other(
            "administrators are not assigned to a crew".into(),
        ));
    }
    if let Some(c) = crew {
        reference::require(pool, ReferenceKind::Crew, c)?;
    }
    users::update_user_crew(pool, username, crew)
}

/// Remove an account. The last administrator cannot be removed.
pub fn remove_user(pool: &DbPool, actor: &Identity, username: &str) -> AppResult<()> {
    if actor.username() == username {
        return Err(AppError::Forbidden("you cannot delete your own account".into()));
    }
    let user = users::find_user(pool, username)?
        .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))?;
    if user.role == Role::Admin {
        let admins = users::list_users(pool)?
            .iter()
            .filter(|u| u.role == Role::Admin)
            .count();
        if admins <= 1 {
            return Err(AppError::Forbidden(
                "the last administrator cannot be deleted".into(),
            ));
        }
    }
    users::delete_user(pool, username)
}

/// Seed the default administrator on an empty user table.
/// Returns whether an account was created.
pub fn ensure_default_admin(pool: &DbPool, password: &str) -> AppResult<bool> {
    if users::count_users(pool)? > 0 {
        return Ok(false);
    }
    create_user(pool, DEFAULT_ADMIN, password, Role::Admin, None)?;
    Ok(true)
}
