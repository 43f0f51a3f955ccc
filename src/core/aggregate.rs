//! Reporting aggregates over an (already filtered) entry list.
//!
//! Grouped sums add back up to [`total_feet`] of the same input.
//! [`by_weekday`] and [`by_week`] skip entries whose date cannot be read,
//! and [`daily_series`] only covers its trailing window.

use crate::core::date::{
    from_storage_string, inclusive_days, normalize_storage_string, to_storage_string, week_start,
};
use crate::errors::{AppError, AppResult};
use crate::models::Entry;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_BUCKET_WIDTH: u32 = 100;
pub const MAX_SERIES_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_feet: u64,
    pub entries: usize,
    pub average_feet: u64,
    pub daily_average: u64,
    pub crews: usize,
    pub types: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub name: String,
    pub feet: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewTypeGroup {
    pub crew: String,
    pub kind: String,
    pub feet: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayStat {
    pub weekday: String,
    pub feet: u64,
    pub entries: usize,
    pub average_feet: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub lo: u64,
    pub hi: u64,
    pub entries: usize,
    pub feet: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewComparison {
    pub crew: String,
    pub total_feet: u64,
    pub entries: usize,
    pub average_feet: u64,
}

pub fn total_feet(entries: &[Entry]) -> u64 {
    entries.iter().map(|e| u64::from(e.feet)).sum()
}

fn rounded_div(total: u64, count: u64) -> u64 {
    if count == 0 {
        0
    } else {
        (total + count / 2) / count
    }
}

/// Headline figures for the reporting range `[from, to]`.
pub fn summary(entries: &[Entry], from: NaiveDate, to: NaiveDate) -> Summary {
    let total = total_feet(entries);
    let days = inclusive_days(from, to) as u64;
    let crews: BTreeSet<&str> = entries.iter().map(|e| e.crew.as_str()).collect();
    let types: BTreeSet<&str> = entries.iter().map(|e| e.kind.as_str()).collect();

    Summary {
        total_feet: total,
        entries: entries.len(),
        average_feet: rounded_div(total, entries.len() as u64),
        daily_average: rounded_div(total, days),
        crews: crews.len(),
        types: types.len(),
    }
}

fn group_by<F>(entries: &[Entry], key: F) -> Vec<Group>
where
    F: Fn(&Entry) -> &str,
{
    let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
    for e in entries {
        *sums.entry(key(e)).or_default() += u64::from(e.feet);
    }

    let mut out: Vec<Group> = sums
        .into_iter()
        .filter(|(_, feet)| *feet > 0)
        .map(|(name, feet)| Group {
            name: name.to_string(),
            feet,
        })
        .collect();

    // BTreeMap already ordered names; a stable sort keeps that for ties.
    out.sort_by(|a, b| b.feet.cmp(&a.feet));
    out
}

pub fn by_crew(entries: &[Entry]) -> Vec<Group> {
    group_by(entries, |e| e.crew.as_str())
}

pub fn by_type(entries: &[Entry]) -> Vec<Group> {
    group_by(entries, |e| e.kind.as_str())
}

pub fn by_user(entries: &[Entry]) -> Vec<Group> {
    group_by(entries, |e| e.username.as_str())
}

pub fn by_crew_and_type(entries: &[Entry]) -> Vec<CrewTypeGroup> {
    let mut sums: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for e in entries {
        *sums.entry((e.crew.as_str(), e.kind.as_str())).or_default() += u64::from(e.feet);
    }

    let mut out: Vec<CrewTypeGroup> = sums
        .into_iter()
        .map(|((crew, kind), feet)| CrewTypeGroup {
            crew: crew.to_string(),
            kind: kind.to_string(),
            feet,
        })
        .collect();
    out.sort_by(|a, b| b.feet.cmp(&a.feet));
    out
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Monday-first production per weekday. Entries without a readable date
/// are skipped.
pub fn by_weekday(entries: &[Entry]) -> Vec<WeekdayStat> {
    let mut stats: BTreeMap<u32, (u64, usize)> = BTreeMap::new();
    for e in entries {
        if let Some(d) = from_storage_string(&e.date) {
            let slot = stats
                .entry(d.weekday().num_days_from_monday())
                .or_default();
            slot.0 += u64::from(e.feet);
            slot.1 += 1;
        }
    }

    WEEK.iter()
        .filter_map(|day| {
            let (feet, count) = *stats.get(&day.num_days_from_monday())?;
            Some(WeekdayStat {
                weekday: weekday_name(*day).to_string(),
                feet,
                entries: count,
                average_feet: rounded_div(feet, count as u64),
            })
        })
        .collect()
}

/// Sum per calendar day, keyed by the storage string, oldest first.
pub fn by_day(entries: &[Entry]) -> Vec<Group> {
    let mut sums: BTreeMap<String, u64> = BTreeMap::new();
    for e in entries {
        let key = normalize_storage_string(&e.date).unwrap_or_else(|| e.date.clone());
        *sums.entry(key).or_default() += u64::from(e.feet);
    }
    sums.into_iter()
        .map(|(name, feet)| Group { name, feet })
        .collect()
}

/// Zero-filled per-day totals for the last `min(days, 30)` days ending at `to`.
pub fn daily_series(entries: &[Entry], from: NaiveDate, to: NaiveDate) -> Vec<Group> {
    let days = inclusive_days(from, to).min(MAX_SERIES_DAYS);
    let per_day: BTreeMap<String, u64> = by_day(entries)
        .into_iter()
        .map(|g| (g.name, g.feet))
        .collect();

    (0..days)
        .rev()
        .map(|offset| {
            let key = to_storage_string(to - Days::new(offset as u64));
            let feet = per_day.get(&key).copied().unwrap_or(0);
            Group { name: key, feet }
        })
        .collect()
}

/// Sum per week, keyed by the Sunday starting it, oldest first.
pub fn by_week(entries: &[Entry]) -> Vec<Group> {
    let mut sums: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for e in entries {
        if let Some(d) = from_storage_string(&e.date) {
            *sums.entry(week_start(d)).or_default() += u64::from(e.feet);
        }
    }
    sums.into_iter()
        .map(|(start, feet)| Group {
            name: to_storage_string(start),
            feet,
        })
        .collect()
}

/// Fixed-width distribution: an entry lands in bucket `floor(feet / width)`.
pub fn buckets(entries: &[Entry], width: u32) -> AppResult<Vec<Bucket>> {
    if width == 0 {
        return Err(AppError::Config("bucket width must be positive".into()));
    }
    let width = u64::from(width);

    let mut slots: BTreeMap<u64, (usize, u64)> = BTreeMap::new();
    for e in entries {
        let feet = u64::from(e.feet);
        let slot = slots.entry(feet / width).or_default();
        slot.0 += 1;
        slot.1 += feet;
    }

    Ok(slots
        .into_iter()
        .map(|(index, (count, feet))| {
            let lo = index * width;
            let hi = lo + width;
            Bucket {
                label: format!("{lo}-{hi}"),
                lo,
                hi,
                entries: count,
                feet,
            }
        })
        .collect())
}

pub fn crew_comparison(entries: &[Entry]) -> Vec<CrewComparison> {
    let mut stats: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for e in entries {
        let slot = stats.entry(e.crew.as_str()).or_default();
        slot.0 += u64::from(e.feet);
        slot.1 += 1;
    }
    stats
        .into_iter()
        .map(|(crew, (total, count))| CrewComparison {
            crew: crew.to_string(),
            total_feet: total,
            entries: count,
            average_feet: rounded_div(total, count as u64),
        })
        .collect()
}
