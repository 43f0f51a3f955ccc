use chrono::NaiveDate;
use prodlog::core::permission::{EditPolicy, can_edit, visible_entries};
use prodlog::models::Identity;

mod common;
use common::{admin, entry, supervisor};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

#[test]
fn owner_within_window_may_edit() {
    let e = entry("2024/05/20", "AJS1", "ROCK", 120, "sup1");
    assert!(can_edit(&e, &supervisor("sup1"), today()));
}

#[test]
fn other_supervisor_may_not_edit() {
    let e = entry("2024/05/20", "AJS1", "ROCK", 120, "sup1");
    assert!(!can_edit(&e, &supervisor("sup2"), today()));
}

#[test]
fn owner_outside_window_may_not_edit() {
    let e = entry("2024/05/01", "AJS1", "ROCK", 120, "sup1");
    assert!(!can_edit(&e, &supervisor("sup1"), today()));
}

#[test]
fn admin_may_edit_anything() {
    for e in [
        entry("2024/05/01", "AJS1", "ROCK", 120, "sup1"),
        entry("2019/01/01", "AJS2", "NO ROCK", 5, ""),
        entry("not a date", "AJS2", "NO ROCK", 5, "sup2"),
    ] {
        assert!(can_edit(&e, &admin(), today()));
    }
}

#[test]
fn window_boundary_is_inclusive() {
    // today - 30 days = 2024-05-16
    let on_cutoff = entry("2024/05/16", "AJS1", "ROCK", 10, "sup1");
    let day_before = entry("2024/05/15", "AJS1", "ROCK", 10, "sup1");
    assert!(can_edit(&on_cutoff, &supervisor("sup1"), today()));
    assert!(!can_edit(&day_before, &supervisor("sup1"), today()));
}

#[test]
fn legacy_dash_dates_are_honoured() {
    let e = entry("2024-06-01", "AJS1", "ROCK", 10, "sup1");
    assert!(can_edit(&e, &supervisor("sup1"), today()));
}

#[test]
fn unreadable_date_fails_closed() {
    let e = entry("06/01/2024", "AJS1", "ROCK", 10, "sup1");
    assert!(!can_edit(&e, &supervisor("sup1"), today()));
}

#[test]
fn ownerless_entry_is_not_editable_by_supervisor() {
    let e = entry("2024/06/10", "AJS1", "ROCK", 10, "");
    let nameless = Identity::Supervisor {
        username: String::new(),
        crew: None,
    };
    assert!(!can_edit(&e, &nameless, today()));
}

#[test]
fn future_dates_stay_editable() {
    let e = entry("2024/07/01", "AJS1", "ROCK", 10, "sup1");
    assert!(can_edit(&e, &supervisor("sup1"), today()));
}

#[test]
fn configured_window_moves_the_cutoff() {
    let policy = EditPolicy::new(7);
    let e = entry("2024/06/07", "AJS1", "ROCK", 10, "sup1");
    assert!(!policy.can_edit(&e, &supervisor("sup1"), today()));
    let day_before = NaiveDate::from_ymd_opt(2024, 6, 14).expect("valid date");
    assert!(policy.can_edit(&e, &supervisor("sup1"), day_before));
}

#[test]
fn supervisors_only_see_their_own_entries() {
    let entries = vec![
        entry("2024/06/10", "AJS1", "ROCK", 10, "sup1"),
        entry("2024/06/11", "AJS2", "ROCK", 20, "sup2"),
        entry("2024/06/12", "AJS1", "NO ROCK", 30, "sup1"),
    ];

    let mine = visible_entries(&entries, &supervisor("sup1"));
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|e| e.username == "sup1"));

    assert_eq!(visible_entries(&entries, &admin()).len(), 3);
}
