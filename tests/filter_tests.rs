use chrono::NaiveDate;
use prodlog::core::filter::EntryFilter;
use prodlog::models::Entry;

mod common;
use common::entry;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn sample() -> Vec<Entry> {
    vec![
        entry("2024/06/12", "AJS1", "ROCK", 100, "alice"),
        entry("2024-06-10", "AJS2", "NO ROCK", 250, "bob"),
        entry("2024/06/01", "AJS1", "NO ROCK", 75, "carol"),
        entry("2024/05/31", "AJS2", "ROCK", 40, "alice"),
        entry("bad-date", "AJS1", "ROCK", 10, "bob"),
    ]
}

fn users(entries: &[Entry]) -> Vec<&str> {
    entries.iter().map(|e| e.username.as_str()).collect()
}

#[test]
fn empty_filter_keeps_everything_in_order() {
    let all = sample();
    assert_eq!(EntryFilter::new().apply(&all), all);
}

#[test]
fn search_is_case_insensitive_over_user_crew_and_type() {
    let all = sample();
    assert_eq!(
        users(&EntryFilter::new().search("ALICE").apply(&all)),
        ["alice", "alice"]
    );
    assert_eq!(EntryFilter::new().search("ajs2").apply(&all).len(), 2);
    // "rock" also matches "NO ROCK"
    assert_eq!(EntryFilter::new().search("rock").apply(&all).len(), 5);
    assert_eq!(EntryFilter::new().search("no r").apply(&all).len(), 2);
}

#[test]
fn blank_search_is_ignored() {
    let all = sample();
    assert_eq!(EntryFilter::new().search("   ").apply(&all).len(), all.len());
}

#[test]
fn crew_and_type_match_exactly() {
    let all = sample();
    assert_eq!(EntryFilter::new().crew("AJS1").apply(&all).len(), 3);
    assert_eq!(EntryFilter::new().crew("ajs1").apply(&all).len(), 0);
    assert_eq!(EntryFilter::new().kind("ROCK").apply(&all).len(), 3);
}

#[test]
fn all_selector_disables_crew_and_type() {
    let all = sample();
    let f = EntryFilter::new().crew("all").kind("all");
    assert_eq!(f.apply(&all).len(), all.len());
}

#[test]
fn range_is_inclusive_on_both_ends() {
    let all = sample();
    let f = EntryFilter::new().range(Some(d(2024, 6, 1)), Some(d(2024, 6, 10)));
    assert_eq!(users(&f.apply(&all)), ["bob", "carol"]);
}

#[test]
fn open_ended_ranges() {
    let all = sample();
    let since = EntryFilter::new().range(Some(d(2024, 6, 10)), None);
    assert_eq!(users(&since.apply(&all)), ["alice", "bob"]);

    let until = EntryFilter::new().range(None, Some(d(2024, 5, 31)));
    assert_eq!(users(&until.apply(&all)), ["alice"]);
}

#[test]
fn unreadable_dates_drop_out_of_bounded_ranges_only() {
    let all = sample();
    let bounded = EntryFilter::new().range(Some(d(2000, 1, 1)), None);
    assert_eq!(bounded.apply(&all).len(), 4);
    assert_eq!(EntryFilter::new().crew("AJS1").apply(&all).len(), 3);
}

#[test]
fn predicates_compose_in_any_order() {
    let all = sample();
    let combined = EntryFilter::new()
        .search("a")
        .crew("AJS1")
        .kind("NO ROCK")
        .range(Some(d(2024, 6, 1)), Some(d(2024, 6, 30)));
    let expected = combined.apply(&all);
    assert_eq!(users(&expected), ["carol"]);

    let steps = [
        EntryFilter::new().kind("NO ROCK"),
        EntryFilter::new().range(Some(d(2024, 6, 1)), Some(d(2024, 6, 30))),
        EntryFilter::new().crew("AJS1"),
        EntryFilter::new().search("a"),
    ];

    let forward = steps.iter().fold(all.clone(), |acc, f| f.apply(&acc));
    let backward = steps.iter().rev().fold(all.clone(), |acc, f| f.apply(&acc));
    assert_eq!(forward, expected);
    assert_eq!(backward, expected);
}

#[test]
fn matches_agrees_with_apply() {
    let all = sample();
    let f = EntryFilter::new().crew("AJS2");
    let kept: Vec<Entry> = all.iter().filter(|e| f.matches(e)).cloned().collect();
    assert_eq!(kept, f.apply(&all));
}

#[test]
fn matches_single_entry_with_every_predicate() {
    let alice = entry("2024/06/12", "AJS1", "ROCK", 100, "alice");
    let undated = entry("bad-date", "AJS1", "ROCK", 10, "bob");
    let f = EntryFilter::new()
        .search(" Ali ")
        .crew("AJS1")
        .kind("all")
        .range(Some(d(2024, 6, 1)), Some(d(2024, 6, 30)));

    assert!(f.matches(&alice));
    assert!(!f.matches(&undated));
    assert!(!f.clone().crew("AJS2").matches(&alice));
    assert!(EntryFilter::new().search("   ").matches(&undated));
}
