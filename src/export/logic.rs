// src/export/logic.rs

use crate::core::date::{from_storage_string, today};
use crate::core::entries::list_matching;
use crate::core::filter::EntryFilter;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv_export::export_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::html::export_html;
use crate::export::json_export::export_json;
use crate::export::xlsx::export_xlsx;
use crate::models::Entry;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

/// High level export driver.
pub struct ExportLogic;

impl ExportLogic {
    /// Export every entry that passes `filter`.
    ///
    /// `from`/`to` label the HTML report and drive its daily average; when
    /// absent they default to the oldest and newest exported dates.
    /// Returns the number of exported entries.
    pub fn export(
        pool: &DbPool,
        filter: &EntryFilter,
        format: ExportFormat,
        path: &Path,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        force: bool,
    ) -> AppResult<usize> {
        ensure_writable(path, force)?;

        let entries = list_matching(pool, filter)?;

        if entries.is_empty() {
            warning("No entries match the selected filters; writing an empty export.");
        }

        match format {
            ExportFormat::Csv => export_csv(&entries, path)?,
            ExportFormat::Json => export_json(&entries, path)?,
            ExportFormat::Xlsx => export_xlsx(&entries, path)?,
            ExportFormat::Html => {
                let (first, last) = span(&entries);
                export_html(&entries, path, from.unwrap_or(first), to.unwrap_or(last))?
            }
        }

        audit(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} entries as {}", entries.len(), format.as_str()),
        );

        Ok(entries.len())
    }
}

/// Oldest and newest readable dates, or today for an empty set.
fn span(entries: &[Entry]) -> (NaiveDate, NaiveDate) {
    let dates: Vec<NaiveDate> = entries
        .iter()
        .filter_map(|e| from_storage_string(&e.date))
        .collect();
    let now = today();
    (
        dates.iter().min().copied().unwrap_or(now),
        dates.iter().max().copied().unwrap_or(now),
    )
}
