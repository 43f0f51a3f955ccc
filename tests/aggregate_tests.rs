use chrono::NaiveDate;
use prodlog::core::aggregate::{
    buckets, by_crew, by_crew_and_type, by_day, by_type, by_user, by_week, by_weekday,
    crew_comparison, daily_series, summary, total_feet,
};
use prodlog::core::report::Report;
use prodlog::errors::AppError;
use prodlog::models::Entry;

mod common;
use common::entry;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn sample() -> Vec<Entry> {
    vec![
        // 2024-06-10 is a Monday
        entry("2024/06/10", "AJS1", "ROCK", 100, "alice"),
        entry("2024/06/10", "AJS2", "NO ROCK", 250, "bob"),
        entry("2024-06-11", "AJS1", "NO ROCK", 75, "alice"),
        entry("2024/06/16", "AJS2", "ROCK", 40, "carol"),
        entry("2024/06/17", "AJS1", "ROCK", 199, "bob"),
    ]
}

#[test]
fn grouped_sums_conserve_the_total() {
    let all = sample();
    let total = total_feet(&all);
    assert_eq!(total, 664);

    let sum = |groups: Vec<prodlog::core::aggregate::Group>| -> u64 {
        groups.iter().map(|g| g.feet).sum()
    };
    assert_eq!(sum(by_crew(&all)), total);
    assert_eq!(sum(by_type(&all)), total);
    assert_eq!(sum(by_user(&all)), total);
    assert_eq!(sum(by_day(&all)), total);
    assert_eq!(sum(by_week(&all)), total);
    assert_eq!(by_crew_and_type(&all).iter().map(|g| g.feet).sum::<u64>(), total);
    assert_eq!(by_weekday(&all).iter().map(|g| g.feet).sum::<u64>(), total);
    assert_eq!(buckets(&all, 100).expect("buckets").iter().map(|b| b.feet).sum::<u64>(), total);
    assert_eq!(crew_comparison(&all).iter().map(|c| c.total_feet).sum::<u64>(), total);
}

#[test]
fn groups_sorted_by_feet_then_name() {
    let all = sample();
    let crews = by_crew(&all);
    assert_eq!(crews[0].name, "AJS1");
    assert_eq!(crews[0].feet, 374);
    assert_eq!(crews[1].name, "AJS2");
    assert_eq!(crews[1].feet, 290);

    let tie = vec![
        entry("2024/06/10", "B", "ROCK", 50, "x"),
        entry("2024/06/10", "A", "ROCK", 50, "x"),
    ];
    let names: Vec<String> = by_crew(&tie).into_iter().map(|g| g.name).collect();
    assert_eq!(names, ["A", "B"]);
}

#[test]
fn summary_rounds_averages() {
    let all = sample();
    let s = summary(&all, d(2024, 6, 10), d(2024, 6, 17));
    assert_eq!(s.total_feet, 664);
    assert_eq!(s.entries, 5);
    assert_eq!(s.average_feet, 133); // 132.8
    assert_eq!(s.daily_average, 83); // 664 / 8 days
    assert_eq!(s.crews, 2);
    assert_eq!(s.types, 2);

    let empty = summary(&[], d(2024, 6, 10), d(2024, 6, 10));
    assert_eq!(empty.average_feet, 0);
    assert_eq!(empty.daily_average, 0);
}

#[test]
fn weekday_heatmap_is_monday_first() {
    let stats = by_weekday(&sample());
    let days: Vec<&str> = stats.iter().map(|s| s.weekday.as_str()).collect();
    assert_eq!(days, ["Monday", "Tuesday", "Sunday"]);
    assert_eq!(stats[0].feet, 549);
    assert_eq!(stats[0].entries, 3);
    assert_eq!(stats[0].average_feet, 183);
}

#[test]
fn daily_series_is_zero_filled_and_capped() {
    let all = sample();
    let series = daily_series(&all, d(2024, 6, 9), d(2024, 6, 12));
    let pairs: Vec<(&str, u64)> = series.iter().map(|g| (g.name.as_str(), g.feet)).collect();
    assert_eq!(
        pairs,
        [
            ("2024/06/09", 0),
            ("2024/06/10", 350),
            ("2024/06/11", 75),
            ("2024/06/12", 0)
        ]
    );

    let long = daily_series(&all, d(2024, 1, 1), d(2024, 6, 30));
    assert_eq!(long.len(), 30);
    assert_eq!(long[0].name, "2024/06/01");
    assert_eq!(long[29].name, "2024/06/30");
}

#[test]
fn weeks_start_on_sunday() {
    let weeks = by_week(&sample());
    let pairs: Vec<(&str, u64)> = weeks.iter().map(|g| (g.name.as_str(), g.feet)).collect();
    assert_eq!(pairs, [("2024/06/09", 425), ("2024/06/16", 239)]);
}

#[test]
fn buckets_use_floor_division() {
    let entries = vec![
        entry("2024/06/10", "AJS1", "ROCK", 99, "a"),
        entry("2024/06/10", "AJS1", "ROCK", 100, "a"),
        entry("2024/06/10", "AJS1", "ROCK", 199, "a"),
        entry("2024/06/10", "AJS1", "ROCK", 200, "a"),
    ];
    let b = buckets(&entries, 100).expect("buckets");
    let labels: Vec<&str> = b.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["0-100", "100-200", "200-300"]);
    assert_eq!(b[1].entries, 2);
    assert_eq!(b[1].feet, 299);
}

#[test]
fn zero_bucket_width_is_a_config_error() {
    assert!(matches!(buckets(&sample(), 0), Err(AppError::Config(_))));
}

#[test]
fn crew_comparison_reports_totals_and_averages() {
    let cmp = crew_comparison(&sample());
    assert_eq!(cmp.len(), 2);
    assert_eq!(cmp[0].crew, "AJS1");
    assert_eq!(cmp[0].entries, 3);
    assert_eq!(cmp[0].average_feet, 125); // 374 / 3
}

#[test]
fn report_bundles_every_section() {
    let all = sample();
    let report = Report::build(&all, d(2024, 6, 10), d(2024, 6, 17), 100).expect("report");
    assert_eq!(report.from, "2024/06/10");
    assert_eq!(report.summary.total_feet, 664);
    assert_eq!(report.daily.len(), 8);
    assert_eq!(report.by_user[0].name, "bob");

    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["summary"]["entries"], 5);
}
