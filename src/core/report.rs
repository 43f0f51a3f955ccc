//! Dashboard-style report over the filtered entries of a date range.

use crate::core::aggregate::{
    self, Bucket, CrewComparison, CrewTypeGroup, Group, Summary, WeekdayStat,
};
use crate::core::date::{display_stored, to_display_string, to_storage_string};
use crate::errors::AppResult;
use crate::models::Entry;
use crate::ui::messages::header;
use crate::utils::formatting::{bar, bold, feet, thousands};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;
use serde::Serialize;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub from: String,
    pub to: String,
    pub summary: Summary,
    pub by_crew: Vec<Group>,
    pub by_type: Vec<Group>,
    pub by_user: Vec<Group>,
    pub by_crew_and_type: Vec<CrewTypeGroup>,
    pub by_weekday: Vec<WeekdayStat>,
    pub distribution: Vec<Bucket>,
    pub daily: Vec<Group>,
    pub weekly: Vec<Group>,
    pub crew_comparison: Vec<CrewComparison>,
}

impl Report {
    /// `entries` must already be restricted to `[from, to]`.
    pub fn build(
        entries: &[Entry],
        from: NaiveDate,
        to: NaiveDate,
        bucket_width: u32,
    ) -> AppResult<Self> {
        Ok(Self {
            from: to_storage_string(from),
            to: to_storage_string(to),
            summary: aggregate::summary(entries, from, to),
            by_crew: aggregate::by_crew(entries),
            by_type: aggregate::by_type(entries),
            by_user: aggregate::by_user(entries),
            by_crew_and_type: aggregate::by_crew_and_type(entries),
            by_weekday: aggregate::by_weekday(entries),
            distribution: aggregate::buckets(entries, bucket_width)?,
            daily: aggregate::daily_series(entries, from, to),
            weekly: aggregate::by_week(entries),
            crew_comparison: aggregate::crew_comparison(entries),
        })
    }
}

fn group_table(title: &str, groups: &[Group], display_dates: bool, sep: &str) {
    println!("{}", bold(title));
    if groups.is_empty() {
        println!("  (no data)\n");
        return;
    }
    let max = groups.iter().map(|g| g.feet).max().unwrap_or(0);
    let mut t = Table::new(vec![Column::left("Name"), Column::right("Feet"), Column::left("")])
        .with_separator(sep);
    for g in groups {
        let name = if display_dates {
            display_stored(&g.name)
        } else {
            g.name.clone()
        };
        t.add_row(vec![name, feet(g.feet), bar(g.feet, max, BAR_WIDTH)]);
    }
    println!("{}", t.render());
}

/// Print the report as terminal tables.
pub fn print_report(report: &Report, from: NaiveDate, to: NaiveDate, sep: &str) {
    header(format!(
        "Production {} → {}",
        to_display_string(from),
        to_display_string(to)
    ));

    let s = &report.summary;
    println!("Total production : {}", feet(s.total_feet));
    println!("Entries          : {}", thousands(s.entries as u64));
    println!("Average / entry  : {}", feet(s.average_feet));
    println!("Daily average    : {}", feet(s.daily_average));
    println!("Active crews     : {}", s.crews);
    println!("Work types       : {}\n", s.types);

    group_table("By crew", &report.by_crew, false, sep);
    group_table("By type", &report.by_type, false, sep);
    group_table("By user", &report.by_user, false, sep);

    if !report.by_crew_and_type.is_empty() {
        println!("{}", bold("Crew × type"));
        let mut t = Table::new(vec![
            Column::left("Crew"),
            Column::left("Type"),
            Column::right("Feet"),
        ])
        .with_separator(sep);
        for g in &report.by_crew_and_type {
            t.add_row(vec![g.crew.clone(), g.kind.clone(), feet(g.feet)]);
        }
        println!("{}", t.render());
    }

    if !report.by_weekday.is_empty() {
        println!("{}", bold("By weekday"));
        let max = report
            .by_weekday
            .iter()
            .map(|w| w.average_feet)
            .max()
            .unwrap_or(0);
        let mut t = Table::new(vec![
            Column::left("Day"),
            Column::right("Entries"),
            Column::right("Total"),
            Column::right("Average"),
            Column::left(""),
        ])
        .with_separator(sep);
        for w in &report.by_weekday {
            t.add_row(vec![
                w.weekday.clone(),
                w.entries.to_string(),
                feet(w.feet),
                feet(w.average_feet),
                bar(w.average_feet, max, BAR_WIDTH),
            ]);
        }
        println!("{}", t.render());
    }

    if !report.distribution.is_empty() {
        println!("{}", bold("Distribution (feet per entry)"));
        let max = report
            .distribution
            .iter()
            .map(|b| b.entries as u64)
            .max()
            .unwrap_or(0);
        let mut t = Table::new(vec![
            Column::left("Range"),
            Column::right("Entries"),
            Column::right("Feet"),
            Column::left(""),
        ])
        .with_separator(sep);
        for b in &report.distribution {
            t.add_row(vec![
                b.label.clone(),
                b.entries.to_string(),
                feet(b.feet),
                bar(b.entries as u64, max, BAR_WIDTH),
            ]);
        }
        println!("{}", t.render());
    }

    group_table("Daily production", &report.daily, true, sep);
    group_table("Weekly trend (weeks starting Sunday)", &report.weekly, true, sep);

    if !report.crew_comparison.is_empty() {
        println!("{}", bold("Crew comparison"));
        let mut t = Table::new(vec![
            Column::left("Crew"),
            Column::right("Entries"),
            Column::right("Total"),
            Column::right("Average"),
        ])
        .with_separator(sep);
        for c in &report.crew_comparison {
            t.add_row(vec![
                c.crew.clone(),
                c.entries.to_string(),
                feet(c.total_feet),
                feet(c.average_feet),
            ]);
        }
        println!("{}", t.render());
    }
}
