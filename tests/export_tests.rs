use chrono::NaiveDate;
use predicates::prelude::*;
use prodlog::export::{CSV_HEADER, render_csv, render_html};
use std::fs;

mod common;
use common::{Sandbox, entry};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

#[test]
fn csv_header_and_newest_first_rows() {
    let entries = vec![
        entry("2024/05/01", "AJS1", "ROCK", 10, "alice"),
        entry("2024/06/02", "AJS2", "NO ROCK", 1250, "bob"),
        entry("2024/05/20", "AJS1", "ROCK", 30, "carol"),
    ];

    let csv = render_csv(&entries).expect("csv");
    assert_eq!(
        csv,
        "Date,User,Crew,Type,Feet\n\
         2024/06/02,bob,AJS2,NO ROCK,1250\n\
         2024/05/20,carol,AJS1,ROCK,30\n\
         2024/05/01,alice,AJS1,ROCK,10\n"
    );
    assert_eq!(CSV_HEADER.join(","), "Date,User,Crew,Type,Feet");
}

#[test]
fn csv_never_quotes_embedded_commas() {
    let entries = vec![entry("2024/06/02", "Crew, North", "ROCK", 5, "o\"neil")];
    let csv = render_csv(&entries).expect("csv");
    assert_eq!(csv.lines().nth(1), Some("2024/06/02,o\"neil,Crew, North,ROCK,5"));
}

#[test]
fn csv_of_nothing_is_just_the_header() {
    assert_eq!(render_csv(&[]).expect("csv"), "Date,User,Crew,Type,Feet\n");
}

#[test]
fn html_report_has_summary_and_escaped_rows() {
    let entries = vec![
        entry("2024/06/01", "AJS1", "ROCK", 1000, "alice"),
        entry("2024/06/02", "<b>", "ROCK", 500, "bob & co"),
    ];
    let html = render_html(&entries, d(2024, 6, 1), d(2024, 6, 10));

    assert!(html.contains("<strong>Date Range:</strong> Jun 1, 2024 to Jun 10, 2024"));
    assert!(html.contains("<strong>Total Production:</strong> 1,500 ft"));
    assert!(html.contains("<strong>Entries:</strong> 2"));
    assert!(html.contains("<strong>Average per Entry:</strong> 750 ft"));
    assert!(html.contains("<strong>Daily Average:</strong> 150 ft"));
    assert!(html.contains("<td>Jun 2, 2024</td><td>bob &amp; co</td><td>&lt;b&gt;</td>"));
    assert!(html.contains("<td>1,000 ft</td>"));
    assert!(!html.contains("<td><b></td>"));

    // newest first
    let jun2 = html.find("Jun 2, 2024</td>").expect("row for Jun 2");
    let jun1 = html.find("<td>Jun 1, 2024</td>").expect("row for Jun 1");
    assert!(jun2 < jun1);
}

#[test]
fn export_refuses_to_overwrite_without_force() {
    let sb = Sandbox::new("export_overwrite");
    sb.init_as_admin();
    sb.cmd()
        .args(["add", "2024/06/01", "--crew", "AJS1", "--type", "ROCK", "--feet", "100"])
        .assert()
        .success();

    let out = sb.out("data.csv");
    fs::write(&out, "keep me").expect("seed file");

    // stdin is empty: the overwrite prompt reads "no"
    sb.cmd()
        .args(["export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    sb.cmd()
        .args(["export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).expect("read").starts_with("Date,User,Crew,Type,Feet\n"));
}

#[test]
fn export_json_and_html_files() {
    let sb = Sandbox::new("export_formats");
    sb.init_as_admin();
    for (date, feet) in [("2024/06/01", "100"), ("2024/06/03", "300")] {
        sb.cmd()
            .args(["add", date, "--crew", "AJS2", "--type", "NO ROCK", "--feet", feet])
            .assert()
            .success();
    }

    let json_out = sb.out("data.json");
    sb.cmd()
        .args(["export", "--format", "json", "--file", &json_out])
        .assert()
        .success();
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read")).expect("json");
    let rows = parsed.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "2024/06/03");
    assert_eq!(rows[0]["type"], "NO ROCK");
    assert_eq!(rows[0]["feet"], 300);

    let html_out = sb.out("report.html");
    sb.cmd()
        .args([
            "export", "--format", "html", "--file", &html_out, "--from", "2024/06/01", "--to",
            "2024/06/04",
        ])
        .assert()
        .success();
    let html = fs::read_to_string(&html_out).expect("read");
    assert!(html.contains("Jun 1, 2024 to Jun 4, 2024"));
    assert!(html.contains("<strong>Daily Average:</strong> 100 ft"));

    let xlsx_out = sb.out("data.xlsx");
    sb.cmd()
        .args(["export", "--format", "xlsx", "--file", &xlsx_out])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx_out).expect("xlsx written").len() > 0);
}
