// src/export/csv_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::{notify_export_success, sorted_newest_first};
use crate::models::Entry;
use crate::ui::messages::info;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::path::Path;

pub const CSV_HEADER: [&str; 5] = ["Date", "User", "Crew", "Type", "Feet"];

/// Render entries as CSV text: fixed header, newest first, fields joined
/// with commas and never quoted.
pub fn render_csv(entries: &[Entry]) -> AppResult<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER).map_err(csv_error)?;

    for e in sorted_newest_first(entries) {
        let feet = e.feet.to_string();
        wtr.write_record([
            e.date.as_str(),
            e.username.as_str(),
            e.crew.as_str(),
            e.kind.as_str(),
            feet.as_str(),
        ])
        .map_err(csv_error)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(e.to_string()))
}

pub(crate) fn export_csv(entries: &[Entry], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));
    fs::write(path, render_csv(entries)?)?;
    notify_export_success("CSV", path);
    Ok(())
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Export(format!("CSV write error: {e}"))
}
