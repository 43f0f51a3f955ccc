// src/export/mod.rs

mod csv_export;
mod fs_utils;
mod html;
mod json_export;
pub mod logic;
mod xlsx;

pub use csv_export::{CSV_HEADER, render_csv};
pub use html::render_html;
pub use logic::ExportLogic;

use crate::models::Entry;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Html,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Html => "html",
        }
    }
}

/// Entries newest first. Stable, so equal dates keep their input order.
pub fn sorted_newest_first(entries: &[Entry]) -> Vec<Entry> {
    let mut out = entries.to_vec();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}
