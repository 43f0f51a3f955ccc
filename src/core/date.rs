//! Date normalization between calendar days and the textual storage forms.
//!
//! Entries keep their date as text so that ranges can be compared as plain
//! strings. The canonical form is `YYYY/MM/DD`; older records use
//! `YYYY-MM-DD` and are still accepted on read.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, Months, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

pub const STORAGE_FORMAT: &str = "%Y/%m/%d";
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn storage_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9]{4})([/-])([0-9]{2})([/-])([0-9]{2})$").expect("static date regex")
    })
}

/// Format a calendar day as `YYYY/MM/DD`.
pub fn to_storage_string(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// Parse `YYYY/MM/DD` or `YYYY-MM-DD`.
///
/// Month must be 1-12 and day 1-31. The day is not checked against the
/// length of the month: `2024/02/31` rolls over to 2024-03-02.
pub fn from_storage_string(text: &str) -> Option<NaiveDate> {
    let caps = storage_regex().captures(text)?;

    if caps[2] != caps[4] {
        return None;
    }

    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[3].parse().ok()?;
    let day: u32 = caps[5].parse().ok()?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// Rewrite any accepted form into the canonical storage string.
pub fn normalize_storage_string(text: &str) -> Option<String> {
    from_storage_string(text).map(to_storage_string)
}

/// Human rendering, e.g. `Jan 15, 2023`. Never stored or compared.
///
/// Month names are always English abbreviations; the system locale is
/// not consulted.
pub fn to_display_string(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Display form of a stored date; unparseable text is shown as-is.
pub fn display_stored(text: &str) -> String {
    from_storage_string(text)
        .map(to_display_string)
        .unwrap_or_else(|| text.to_string())
}

/// Parse a date typed on the command line (`today` is accepted too).
pub fn parse_input_date(raw: &str) -> AppResult<NaiveDate> {
    match raw.trim() {
        "today" => Ok(today()),
        "yesterday" => Ok(today() - Days::new(1)),
        other => from_storage_string(other).ok_or_else(|| AppError::InvalidDate(raw.to_string())),
    }
}

/// Sunday starting the week that contains `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - Days::new(u64::from(date.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .map(|next| next - Days::new(1))
        .unwrap_or(date);
    (first, last)
}

/// Inclusive number of calendar days between two bounds (at least 1).
pub fn inclusive_days(from: NaiveDate, to: NaiveDate) -> i64 {
    ((to - from).num_days() + 1).max(1)
}

/// Reporting presets offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TimeFrame {
    Day,
    Yesterday,
    Week,
    Month,
    Quarter,
    Custom,
}

impl TimeFrame {
    pub fn from_config(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" => Some(TimeFrame::Day),
            "yesterday" => Some(TimeFrame::Yesterday),
            "week" => Some(TimeFrame::Week),
            "month" => Some(TimeFrame::Month),
            "quarter" => Some(TimeFrame::Quarter),
            "custom" => Some(TimeFrame::Custom),
            _ => None,
        }
    }

    /// Inclusive `(from, to)` for the preset, relative to `today`.
    /// `Custom` starts from the last 30 days; callers override the bounds.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            TimeFrame::Day => (today, today),
            TimeFrame::Yesterday => {
                let y = today - Days::new(1);
                (y, y)
            }
            TimeFrame::Week => (today - Days::new(7), today),
            TimeFrame::Month => month_bounds(today),
            TimeFrame::Quarter => (today - Days::new(90), today),
            TimeFrame::Custom => (today - Days::new(30), today),
        }
    }
}
