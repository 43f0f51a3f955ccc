use chrono::{Days, Local};
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod common;
use common::Sandbox;

fn days_ago(n: u64) -> String {
    (Local::now().date_naive() - Days::new(n))
        .format("%Y/%m/%d")
        .to_string()
}

#[test]
fn init_creates_database_and_default_admin() {
    let sb = Sandbox::new("cli_init");

    sb.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Default administrator 'admin' created"))
        .stdout(contains("initialization completed"));

    assert!(fs::metadata(&sb.db).is_ok());

    // A second init keeps the existing accounts.
    sb.cmd()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("Default administrator").not());
}

#[test]
fn init_with_custom_admin_password() {
    let sb = Sandbox::new("cli_init_password");
    sb.cmd()
        .args(["--test", "init", "--admin-password", "Strong#Pass1"])
        .assert()
        .success();

    sb.cmd()
        .args(["login", "admin", "--password", "Admin@123"])
        .assert()
        .failure()
        .stderr(contains("Invalid username or password"));

    sb.login("admin", "Strong#Pass1");
}

#[test]
fn commands_require_login() {
    let sb = Sandbox::new("cli_requires_login");
    sb.cmd().args(["--test", "init"]).assert().success();

    sb.cmd()
        .args(["list"])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));

    sb.cmd()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(contains("Not logged in"));
}

#[test]
fn login_whoami_logout() {
    let sb = Sandbox::new("cli_session");
    sb.init_as_admin();

    sb.cmd()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(contains("admin (admin)"));

    sb.cmd()
        .args(["logout"])
        .assert()
        .success()
        .stdout(contains("Logged out"));

    sb.cmd()
        .args(["whoami"])
        .assert()
        .success()
        .stdout(contains("Not logged in"));
}

#[test]
fn add_and_list_entries() {
    let sb = Sandbox::new("cli_add_list");
    sb.init_as_admin();

    sb.cmd()
        .args(["add", "2024-05-20", "--crew", "AJS1", "--type", "ROCK", "--feet", "1200"])
        .assert()
        .success()
        .stdout(contains("Entry #1 saved"))
        .stdout(contains("May 20, 2024"));

    sb.cmd()
        .args(["add", "2024/05/21", "--crew", "AJS2", "--type", "NO ROCK", "--feet", "80"])
        .assert()
        .success();

    sb.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("1,200 ft"))
        .stdout(contains("Showing 2 of 2 entries"));

    sb.cmd()
        .args(["list", "--crew", "AJS2"])
        .assert()
        .success()
        .stdout(contains("Showing 1 of 2 entries"));

    sb.cmd()
        .args(["list", "--search", "no rock", "--json"])
        .assert()
        .success()
        .stdout(contains("\"feet\": 80"))
        .stdout(contains("\"feet\": 1200").not());
}

#[test]
fn add_rejects_bad_input() {
    let sb = Sandbox::new("cli_add_invalid");
    sb.init_as_admin();

    sb.cmd()
        .args(["add", "2024/13/01", "--crew", "AJS1", "--type", "ROCK", "--feet", "10"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    sb.cmd()
        .args(["add", "2024/06/01", "--crew", "AJS1", "--type", "ROCK", "--feet", "0"])
        .assert()
        .failure()
        .stderr(contains("Invalid feet"));

    sb.cmd()
        .args(["add", "2024/06/01", "--crew", "AJS9", "--type", "ROCK", "--feet", "10"])
        .assert()
        .failure()
        .stderr(contains("Crew 'AJS9' not found"));
}

#[test]
fn supervisor_edit_window_and_ownership() {
    let sb = Sandbox::new("cli_supervisor");
    sb.init_as_admin();

    sb.cmd()
        .args(["user", "add", "sup1", "--password", "Crew#2024", "--crew", "AJS1"])
        .assert()
        .success();
    sb.cmd()
        .args(["user", "add", "sup2", "--password", "Crew#2024", "--crew", "AJS2"])
        .assert()
        .success();

    // #1: old entry of sup1
    sb.login("sup1", "Crew#2024");
    sb.cmd()
        .args(["add", &days_ago(45), "--type", "ROCK", "--feet", "100"])
        .assert()
        .success();
    // #2: recent entry of sup1 (crew defaults to AJS1)
    sb.cmd()
        .args(["add", &days_ago(2), "--type", "ROCK", "--feet", "200"])
        .assert()
        .success()
        .stdout(contains("AJS1"));

    sb.cmd()
        .args(["edit", "1", "--feet", "150"])
        .assert()
        .failure()
        .stderr(contains("older than 30 days"));

    sb.cmd()
        .args(["edit", "2", "--feet", "250"])
        .assert()
        .success()
        .stdout(contains("250 ft"));

    // sup2 neither sees nor edits sup1's rows
    sb.login("sup2", "Crew#2024");
    sb.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Showing 0 of 0 entries"));
    sb.cmd()
        .args(["del", "2", "--yes"])
        .assert()
        .failure()
        .stderr(contains("belongs to another user"));

    // admin may delete anything
    sb.login("admin", common::ADMIN_PASSWORD);
    sb.cmd()
        .args(["del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Entry #1 has been deleted"));
    sb.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Showing 1 of 1 entries"));
}

#[test]
fn admin_only_commands_refuse_supervisors() {
    let sb = Sandbox::new("cli_admin_only");
    sb.init_as_admin();
    sb.cmd()
        .args(["user", "add", "sup1", "--password", "Crew#2024"])
        .assert()
        .success();

    sb.login("sup1", "Crew#2024");
    sb.cmd()
        .args(["crew", "add", "AJS3", "--color", "#00FF00"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
    sb.cmd()
        .args(["user", "list"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    // listing crews is open to everyone logged in
    sb.cmd()
        .args(["crew", "list"])
        .assert()
        .success()
        .stdout(contains("AJS1"))
        .stdout(contains("#EF4444"));
}

#[test]
fn crew_and_type_management() {
    let sb = Sandbox::new("cli_reference");
    sb.init_as_admin();

    sb.cmd()
        .args(["type", "add", "GRAVEL", "--color", "#a1b2c3"])
        .assert()
        .success();
    sb.cmd()
        .args(["type", "add", "GRAVEL"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
    sb.cmd()
        .args(["type", "color", "GRAVEL", "#112233"])
        .assert()
        .success()
        .stdout(contains("#112233"));
    sb.cmd()
        .args(["crew", "color", "AJS1", "blue"])
        .assert()
        .failure()
        .stderr(contains("Invalid color"));
    sb.cmd()
        .args(["type", "remove", "GRAVEL"])
        .assert()
        .success();
    sb.cmd()
        .args(["type", "list"])
        .assert()
        .success()
        .stdout(contains("GRAVEL").not());
}

#[test]
fn register_creates_and_logs_in_a_supervisor() {
    let sb = Sandbox::new("cli_register");
    sb.cmd().args(["--test", "init"]).assert().success();

    sb.cmd()
        .args(["register", "newbie", "--password", "short"])
        .assert()
        .failure()
        .stderr(contains("Password too weak"));

    sb.cmd()
        .args(["register", "newbie", "--password", "Newbie#2024", "--crew", "AJS2"])
        .assert()
        .success()
        .stdout(contains("newbie (supervisor, crew AJS2)"));

    sb.cmd()
        .args(["register", "boss", "--password", "Boss#2024", "--role", "admin"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn report_json_summarizes_range() {
    let sb = Sandbox::new("cli_report");
    sb.init_as_admin();
    for (date, crew, feet) in [
        ("2024/06/10", "AJS1", "100"),
        ("2024/06/11", "AJS2", "300"),
        ("2024/07/01", "AJS1", "999"),
    ] {
        sb.cmd()
            .args(["add", date, "--crew", crew, "--type", "ROCK", "--feet", feet])
            .assert()
            .success();
    }

    sb.cmd()
        .args(["report", "--from", "2024/06/01", "--to", "2024/06/30", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_feet\": 400"))
        .stdout(contains("\"daily_average\": 13"))
        .stdout(contains("\"label\": \"300-400\""));

    sb.cmd()
        .args(["report", "--from", "2024/06/01", "--to", "2024/06/30", "--crew", "AJS1"])
        .assert()
        .success()
        .stdout(contains("100 ft"))
        .stdout(contains("Monday"));

    sb.cmd()
        .args(["report", "--from", "2024/06/30", "--to", "2024/06/01"])
        .assert()
        .failure()
        .stderr(contains("start 2024/06/30 is after its end 2024/06/01"));
}

#[test]
fn report_with_only_an_end_date_covers_the_month_before_it() {
    let sb = Sandbox::new("cli_report_to_only");
    sb.init_as_admin();
    for (date, feet) in [("2024/06/10", "100"), ("2024/05/01", "700")] {
        sb.cmd()
            .args(["add", date, "--crew", "AJS1", "--type", "ROCK", "--feet", feet])
            .assert()
            .success();
    }

    sb.cmd()
        .args(["report", "--to", "2024/06/30", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_feet\": 100,"));

    let out = sb.out("to_only.csv");
    sb.cmd()
        .args([
            "export", "--file", &out, "--timeframe", "custom", "--to", "2024/06/30",
        ])
        .assert()
        .success();
    let csv = fs::read_to_string(&out).expect("read csv");
    assert_eq!(csv, "Date,User,Crew,Type,Feet\n2024/06/10,admin,AJS1,ROCK,100\n");
}

#[test]
fn supervisor_report_and_export_cover_every_user() {
    let sb = Sandbox::new("cli_supervisor_report");
    sb.init_as_admin();
    let today = days_ago(0);

    sb.cmd()
        .args(["user", "add", "sup1", "--password", "Crew#2024", "--crew", "AJS1"])
        .assert()
        .success();
    sb.cmd()
        .args(["add", &today, "--crew", "AJS2", "--type", "ROCK", "--feet", "500"])
        .assert()
        .success();

    sb.login("sup1", "Crew#2024");
    sb.cmd()
        .args(["add", &today, "--type", "ROCK", "--feet", "50"])
        .assert()
        .success();

    sb.cmd()
        .args(["report", "--timeframe", "day", "--json"])
        .assert()
        .success()
        .stdout(contains("\"total_feet\": 550,"))
        .stdout(contains("\"name\": \"admin\""));

    let out = sb.out("everyone.csv");
    sb.cmd()
        .args(["export", "--file", &out])
        .assert()
        .success();
    let csv = fs::read_to_string(&out).expect("read csv");
    assert!(csv.contains(",admin,AJS2,ROCK,500"));
    assert!(csv.contains(",sup1,AJS1,ROCK,50"));

    // the audit list still shows only the supervisor's own rows
    sb.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Showing 1 of 1 entries"));
}

#[test]
fn csv_export_from_cli() {
    let sb = Sandbox::new("cli_export_csv");
    sb.init_as_admin();
    sb.cmd()
        .args(["add", "2024/06/01", "--crew", "AJS1", "--type", "ROCK", "--feet", "10"])
        .assert()
        .success();
    sb.cmd()
        .args(["add", "2024/06/05", "--crew", "AJS2", "--type", "NO ROCK", "--feet", "20"])
        .assert()
        .success();

    let out = sb.out("production.csv");
    sb.cmd()
        .args(["export", "--file", &out, "--crew", "all"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    assert_eq!(
        fs::read_to_string(&out).expect("read csv"),
        "Date,User,Crew,Type,Feet\n\
         2024/06/05,admin,AJS2,NO ROCK,20\n\
         2024/06/01,admin,AJS1,ROCK,10\n"
    );
}

#[test]
fn log_and_backup() {
    let sb = Sandbox::new("cli_log_backup");
    sb.init_as_admin();
    sb.cmd()
        .args(["add", "2024/06/01", "--crew", "AJS1", "--type", "ROCK", "--feet", "10"])
        .assert()
        .success();

    sb.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("login"))
        .stdout(contains("add"));

    let dest = sb.out("backup.sqlite");
    sb.cmd()
        .args(["backup", "--file", &dest, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));
    assert!(fs::metadata(sb.out("backup.zip")).is_ok());
    assert!(fs::metadata(&dest).is_err());
}

#[test]
fn db_info_and_check() {
    let sb = Sandbox::new("cli_db");
    sb.init_as_admin();

    sb.cmd()
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Entries:"))
        .stdout(contains("Integrity check passed"));
}
