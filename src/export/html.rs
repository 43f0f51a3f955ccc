// src/export/html.rs

use crate::core::aggregate::summary;
use crate::core::date::{display_stored, to_display_string};
use crate::errors::AppResult;
use crate::export::{notify_export_success, sorted_newest_first};
use crate::models::Entry;
use crate::ui::messages::info;
use crate::utils::formatting::thousands;
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 20px; }
h1 { color: #333; }
h2 { color: #555; margin-top: 20px; }
table { border-collapse: collapse; width: 100%; margin-top: 20px; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
.summary { margin: 20px 0; }
.summary div { margin: 5px 0; }
@media print { button { display: none; } }";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Print-friendly HTML report for `[from, to]`.
pub fn render_html(entries: &[Entry], from: NaiveDate, to: NaiveDate) -> String {
    let s = summary(entries, from, to);
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>Production Data Report</title>
<style>
{STYLE}
</style>
</head>
<body>
<button onclick=\"window.print();\">Print Report</button>
<h1>Production Data Report</h1>
<div class=\"summary\">
<div><strong>Date Range:</strong> {} to {}</div>
<div><strong>Total Production:</strong> {} ft</div>
<div><strong>Entries:</strong> {}</div>
<div><strong>Average per Entry:</strong> {} ft</div>
<div><strong>Daily Average:</strong> {} ft</div>
</div>
<h2>Detailed Production Entries</h2>
<table>
<thead>
<tr><th>Date</th><th>User</th><th>Crew</th><th>Type</th><th>Feet</th></tr>
</thead>
<tbody>
",
        escape(&to_display_string(from)),
        escape(&to_display_string(to)),
        thousands(s.total_feet),
        s.entries,
        thousands(s.average_feet),
        thousands(s.daily_average),
    );

    for e in sorted_newest_first(entries) {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{} ft</td></tr>",
            escape(&display_stored(&e.date)),
            escape(&e.username),
            escape(&e.crew),
            escape(&e.kind),
            thousands(u64::from(e.feet)),
        );
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

pub(crate) fn export_html(
    entries: &[Entry],
    path: &Path,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<()> {
    info(format!("Exporting to HTML: {}", path.display()));
    fs::write(path, render_html(entries, from, to))?;
    notify_export_success("HTML", path);
    Ok(())
}
