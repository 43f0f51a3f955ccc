// src/export/xlsx.rs

use crate::core::date::from_storage_string;
use crate::errors::{AppError, AppResult};
use crate::export::csv_export::CSV_HEADER;
use crate::export::{notify_export_success, sorted_newest_first};
use crate::models::Entry;
use crate::ui::messages::info;
use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const DATE_FORMAT: &str = "yyyy/mm/dd";
const FEET_FORMAT: &str = "#,##0";

/// Export XLSX with styling and auto-sized columns.
pub(crate) fn export_xlsx(entries: &[Entry], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Production").map_err(to_export_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in CSV_HEADER.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = CSV_HEADER.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Rows
    // ---------------------------
    for (row_index, e) in sorted_newest_first(entries).iter().enumerate() {
        let row = (row_index + 1) as u32;
        let bg = if row_index % 2 == 0 { band1 } else { band2 };

        write_date_cell(worksheet, row, 0, &e.date, bg)?;
        write_text_cell(worksheet, row, 1, &e.username, bg)?;
        write_text_cell(worksheet, row, 2, &e.crew, bg)?;
        write_text_cell(worksheet, row, 3, &e.kind, bg)?;

        let feet_fmt = band_format(bg)
            .set_num_format(FEET_FORMAT)
            .set_align(FormatAlign::Right);
        worksheet
            .write_with_format(row, 4, f64::from(e.feet), &feet_fmt)
            .map_err(to_export_error)?;

        let widths = [
            e.date.len(),
            UnicodeWidthStr::width(e.username.as_str()),
            UnicodeWidthStr::width(e.crew.as_str()),
            UnicodeWidthStr::width(e.kind.as_str()),
            e.feet.to_string().len() + 2,
        ];
        for (c, w) in widths.into_iter().enumerate() {
            col_widths[c] = col_widths[c].max(w);
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn band_format(bg: Color) -> Format {
    Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin)
}

fn write_text_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    ws.write_with_format(row, col, s, &band_format(bg))
        .map_err(to_export_error)?;
    Ok(())
}

/// Dates become real Excel serials; an unparseable stored date stays text.
fn write_date_cell(ws: &mut Worksheet, row: u32, col: u16, s: &str, bg: Color) -> AppResult<()> {
    match from_storage_string(s).and_then(excel_serial) {
        Some(serial) => {
            let fmt = band_format(bg).set_num_format(DATE_FORMAT);
            ws.write_with_format(row, col, serial, &fmt)
                .map_err(to_export_error)?;
            Ok(())
        }
        None => write_text_cell(ws, row, col, s, bg),
    }
}

/// Days since the 1899-12-30 Excel epoch.
fn excel_serial(date: NaiveDate) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((date - epoch).num_days() as f64)
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
