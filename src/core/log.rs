use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static ansi regex"));
    re.replace_all(s, "").into_owned()
}

/// ANSI colour per audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "user_add" | "crew_add" | "type_add" => Colour::Green,
        "del" | "user_del" | "crew_del" | "type_del" => Colour::Red,
        "edit" | "crew_color" | "type_color" | "user_crew" | "user_passwd" => Colour::Yellow,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" | "login" | "logout" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogRow {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(pool: &DbPool, limit: Option<usize>) -> AppResult<Vec<LogRow>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id DESC LIMIT ?1",
        )?;

        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let rows = stmt.query_map([limit], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogRow {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        entries.reverse();
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        let entries = Self::load(pool, limit)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, op_target) in entries.iter().zip(op_targets) {
            let color = color_for_operation(&e.operation);

            // Truncate on the visible text, then re-colour the operation word.
            let truncated: String = if op_target.chars().count() > OP_WIDTH {
                let mut s: String = op_target.chars().take(OP_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };

            let recolored = match truncated.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(truncated.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&recolored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                recolored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
