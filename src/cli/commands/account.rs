//! `login`, `logout`, `whoami` and `register`.

use super::{open_pool, password_or_prompt, session_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::{Identity, Role};
use crate::ui::messages::{info, success};

fn describe(identity: &Identity) -> String {
    match identity {
        Identity::Admin { username } => format!("{} (admin)", username),
        Identity::Supervisor {
            username,
            crew: Some(crew),
        } => format!("{} (supervisor, crew {})", username, crew),
        Identity::Supervisor {
            username,
            crew: None,
        } => format!("{} (supervisor, no crew)", username),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let store = session_store();

    match cmd {
        Commands::Login { username, password } => {
            let pool = open_pool(cfg)?;
            let password = password_or_prompt(password)?;
            let identity = auth::authenticate(&pool, username, &password)?;
            store.save(&identity)?;
            audit(&pool.conn, "login", identity.username(), "Logged in");
            success(format!("Logged in as {}", describe(&identity)));
        }

        Commands::Logout => {
            let who = store.load().map(|s| s.identity.username().to_string());
            if store.clear()? {
                if let Some(name) = who
                    && let Ok(pool) = open_pool(cfg)
                {
                    audit(&pool.conn, "logout", &name, "Logged out");
                }
                success("Logged out.");
            } else {
                info("Nobody is logged in.");
            }
        }

        Commands::Whoami => {
            let pool = open_pool(cfg)?;
            match store.current(&pool)? {
                Some(identity) => println!("👤 {}", describe(&identity)),
                None => info("Not logged in."),
            }
        }

        Commands::Register {
            username,
            password,
            role,
            crew,
        } => {
            let pool = open_pool(cfg)?;

            // Only an administrator may create another administrator.
            if *role == Role::Admin {
                store.require_admin(&pool).map_err(|e| match e {
                    AppError::NotLoggedIn => AppError::Forbidden(
                        "registering an administrator requires an admin login".into(),
                    ),
                    other => other,
                })?;
            }

            let password = password_or_prompt(password)?;
            let identity = auth::register(&pool, username, &password, *role, crew.as_deref())?;
            store.save(&identity)?;
            audit(
                &pool.conn,
                "user_add",
                identity.username(),
                &format!("Registered as {}", identity.role().to_db_str()),
            );
            success(format!("Registered and logged in as {}", describe(&identity)));
        }

        _ => {}
    }

    Ok(())
}
