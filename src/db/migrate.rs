use crate::db::now_stamp;
use crate::models::ReferenceKind;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result, params};

/// Ensure that the `log` table exists. Migration bookkeeping lives there.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![now_stamp(), version, message],
    )?;
    Ok(())
}

fn create_reference_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS crews (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            color       TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS types (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE,
            color       TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT NOT NULL,
            crew        TEXT NOT NULL,
            feet        INTEGER NOT NULL CHECK(feet > 0),
            type        TEXT NOT NULL,
            username    TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);
        CREATE INDEX IF NOT EXISTS idx_entries_username ON entries(username);
        "#,
    )?;
    Ok(())
}

fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL,
            role        TEXT NOT NULL CHECK(role IN ('admin','supervisor')),
            crew        TEXT,
            created_at  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Seed default crews and types into empty tables.
fn seed_reference_defaults(conn: &Connection) -> Result<()> {
    for kind in [ReferenceKind::Crew, ReferenceKind::Type] {
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", kind.table()),
            [],
            |row| row.get(0),
        )?;
        if count > 0 {
            continue;
        }
        for (name, color) in kind.defaults() {
            conn.execute(
                &format!(
                    "INSERT INTO {} (name, color, created_at) VALUES (?1, ?2, ?3)",
                    kind.table()
                ),
                params![name, color, now_stamp()],
            )?;
        }
    }
    Ok(())
}

fn count_legacy_dates(conn: &Connection) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM entries
         WHERE date GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]'",
        [],
        |row| row.get(0),
    )
}

/// Rewrite legacy `YYYY-MM-DD` entry dates into `YYYY/MM/DD`.
fn normalize_legacy_dates(conn: &Connection) -> Result<()> {
    let legacy = count_legacy_dates(conn)?;
    if legacy == 0 {
        return Ok(());
    }

    warning(format!(
        "{} entries use the legacy YYYY-MM-DD date format, normalizing...",
        legacy
    ));

    let db_path: String = conn
        .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .unwrap_or_default();

    if db_path.is_empty() {
        warning("In-memory or unnamed database, backup skipped.");
    } else {
        backup_before_migration(&db_path)?;
    }

    conn.execute(
        "UPDATE entries SET date = replace(date, '-', '/')
         WHERE date GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]'",
        [],
    )?;

    success(format!("Normalized {} entry dates.", legacy));
    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let to_sql_err = |stage: &str, e: &dyn std::fmt::Display| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed ({}): {}",
            stage, e
        ))))
    };

    let backup_name = format!(
        "{}-backup_db_pre_date_normalization.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = std::path::Path::new(db_path)
        .parent()
        .map(|p| p.join(&backup_name))
        .unwrap_or_else(|| std::path::PathBuf::from(&backup_name));

    let file = File::create(&backup_path).map_err(|e| to_sql_err("create", &e))?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| to_sql_err("start_file", &e))?;

    let db_content = fs::read(db_path).map_err(|e| to_sql_err("read", &e))?;

    zip.write_all(&db_content)
        .map_err(|e| to_sql_err("write_all", &e))?;

    zip.finish().map_err(|e| to_sql_err("finish", &e))?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

type Step = fn(&Connection) -> Result<()>;

/// Ordered, versioned schema steps. Each runs once and is then recorded in
/// the `log` table as `migration_applied`.
const MIGRATIONS: &[(&str, &str, Step)] = &[
    (
        "20240601_0001_create_reference_tables",
        "Created crews and types tables",
        create_reference_tables,
    ),
    (
        "20240601_0002_create_entries",
        "Created entries table",
        create_entries_table,
    ),
    (
        "20240601_0003_create_users",
        "Created users table",
        create_users_table,
    ),
    (
        "20240610_0004_seed_reference_defaults",
        "Seeded default crews and types",
        seed_reference_defaults,
    ),
    (
        "20240715_0005_normalize_entry_dates",
        "Normalized legacy entry dates to YYYY/MM/DD",
        normalize_legacy_dates,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for (version, message, step) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        step(conn).map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Migration {} failed: {}", version, e)),
            )
        })?;

        mark_applied(conn, version, message)?;
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of known migrations not yet applied.
pub fn pending_count(conn: &Connection) -> Result<usize> {
    let applied = applied_versions(conn)?;
    Ok(MIGRATIONS
        .iter()
        .filter(|(v, _, _)| !applied.iter().any(|a| a == v))
        .count())
}
