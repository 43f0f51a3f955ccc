use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::auth::{DEFAULT_ADMIN, DEFAULT_ADMIN_PASSWORD, ensure_default_admin};
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
///  - the default administrator on an empty user table
pub fn handle(cli: &Cli) -> AppResult<()> {
    let Commands::Init { admin_password } = &cli.command else {
        return Ok(());
    };

    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Initializing prodlog…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    success(format!("Database initialized at {}", &cfg.database));

    let password = admin_password.as_deref().unwrap_or(DEFAULT_ADMIN_PASSWORD);
    if ensure_default_admin(&pool, password)? {
        success(format!("Default administrator '{}' created.", DEFAULT_ADMIN));
        if admin_password.is_none() {
            info("Change its password with `prodlog user passwd --password <new>`.");
        }
    }

    audit(
        &pool.conn,
        "init",
        &cfg.database,
        &format!("Database initialized at {}", &cfg.database),
    );

    println!("🎉 prodlog initialization completed!");
    Ok(())
}
