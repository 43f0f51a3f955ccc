use crate::core::date::{display_stored, from_storage_string, inclusive_days};
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let (count, feet): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), IFNULL(SUM(feet), 0) FROM entries",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!("{}• Entries:{} {}{}{}", CYAN, RESET, GREEN, count, RESET);
    println!("{}• Total feet:{} {}{}{}", CYAN, RESET, GREEN, feet, RESET);

    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    println!("{}• Users:{} {}", CYAN, RESET, users);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM entries ORDER BY replace(date, '-', '/') ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT date FROM entries ORDER BY replace(date, '-', '/') DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt = |d: &Option<String>| {
        d.as_deref()
            .map(display_stored)
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(&first_date));
    println!("    to:   {}", fmt(&last_date));

    //
    // 4) AVERAGE FEET/DAY
    //
    if let (Some(f), Some(l)) = (
        first_date.as_deref().and_then(from_storage_string),
        last_date.as_deref().and_then(from_storage_string),
    ) {
        let days = inclusive_days(f, l);
        let avg = feet as f64 / days as f64;
        println!("{}• Average feet/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
