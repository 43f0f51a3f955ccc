use super::{open_pool, session_store};
use crate::cli::parser::{Commands, UserAction};
use crate::config::Config;
use crate::core::auth;
use crate::db::log::audit;
use crate::db::users::list_users;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };

    let pool = open_pool(cfg)?;
    let store = session_store();

    match action {
        UserAction::List => {
            store.require_admin(&pool)?;

            let mut table = Table::new(vec![
                Column::left("Username"),
                Column::left("Role"),
                Column::left("Crew"),
                Column::left("Created"),
            ])
            .with_separator(&cfg.separator_char);

            for u in list_users(&pool)? {
                table.add_row(vec![
                    u.username,
                    u.role.to_db_str().to_string(),
                    u.crew.unwrap_or_else(|| "-".to_string()),
                    u.created_at.unwrap_or_default(),
                ]);
            }
            println!("{}", table.render());
        }

        UserAction::Add {
            username,
            password,
            role,
            crew,
        } => {
            let admin = store.require_admin(&pool)?;
            let user = auth::create_user(&pool, username, password, *role, crew.as_deref())?;
            audit(
                &pool.conn,
                "user_add",
                &user.username,
                &format!("Created as {} by {}", user.role.to_db_str(), admin.username()),
            );
            success(format!("User '{}' created.", user.username));
        }

        UserAction::Remove { username } => {
            let admin = store.require_admin(&pool)?;
            auth::remove_user(&pool, &admin, username)?;
            audit(
                &pool.conn,
                "user_del",
                username,
                &format!("Removed by {}", admin.username()),
            );
            success(format!("User '{}' removed.", username));
        }

        UserAction::Crew { username, crew } => {
            let admin = store.require_admin(&pool)?;
            auth::change_crew(&pool, username, crew.as_deref())?;
            audit(
                &pool.conn,
                "user_crew",
                username,
                &format!(
                    "Crew set to {} by {}",
                    crew.as_deref().unwrap_or("none"),
                    admin.username()
                ),
            );
            success(format!(
                "User '{}' crew: {}",
                username,
                crew.as_deref().unwrap_or("none")
            ));
        }

        UserAction::Passwd { username, password } => {
            let actor = store.require(&pool)?;
            let target = username.as_deref().unwrap_or(actor.username()).to_string();

            if target != actor.username() && !actor.is_admin() {
                return Err(AppError::Forbidden(
                    "only administrators can change another user's password".into(),
                ));
            }

            auth::change_password(&pool, &target, password)?;
            audit(
                &pool.conn,
                "user_passwd",
                &target,
                &format!("Password changed by {}", actor.username()),
            );
            success(format!("Password for '{}' changed.", target));
        }
    }

    Ok(())
}
