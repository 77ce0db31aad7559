use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use crate::schedule::{hour_label, Allocation, CoverageReport, Day, ScheduleGrid};
use crate::schedule::allocator::Commit;

/// Formats the workers of one slot, "[EMPTY]" when nobody is there
pub fn format_slot(names: &[String]) -> String {
    if names.is_empty() {
        "[EMPTY]".to_string()
    } else {
        names.join(", ")
    }
}

/// Renders the grid as text, one `** Day **` header per day followed by `HH:MM names` lines
pub fn schedule_to_text(grid: &ScheduleGrid) -> String {
    let mut out = String::new();
    for day in Day::ALL {
        let _ = writeln!(out, "** {} **", day);
        for (hour, names) in grid.day_slots(day) {
            let _ = writeln!(out, "{} {}", hour_label(hour), format_slot(names));
        }
    }
    out
}

/// Writes the text layout of the grid to `filename`
pub fn write_schedule_to_file(grid: &ScheduleGrid, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;
    file.write_all(schedule_to_text(grid).as_bytes())?;
    Ok(())
}

/// Prints the allocation and its coverage summary to stdout
pub fn print_allocation(allocation: &Allocation, report: &CoverageReport) {
    println!("\n=== Weekly Schedule ===");
    if allocation.grid.is_empty_assignment() {
        println!("No worker was assigned.");
    }
    print!("{}", schedule_to_text(&allocation.grid));

    println!("\n=== Workers ===");
    for outcome in &allocation.outcomes {
        if outcome.shortfall() > 0 {
            println!("  {} {}/{} h (short by {})", outcome.name, outcome.assigned, outcome.requested, outcome.shortfall());
        } else {
            println!("  {} {}/{} h", outcome.name, outcome.assigned, outcome.requested);
        }
    }

    let short = allocation.shortfalls().count();
    if short > 0 {
        println!("  {} worker(s) could not reach their requested hours", short);
    }

    if report.is_fully_staffed() {
        println!("\nAll {} slots reach their staffing target", report.total_slots);
    } else {
        println!(
            "\nUnderstaffed slots: {} of {} ({} staff-hours missing)",
            report.understaffed.len(),
            report.total_slots,
            report.missing_staff_hours()
        );
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a minimal page reporting a rejected submission
pub fn render_error_html(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Invalid input</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n<h1>Invalid input</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back</a></p>\n</body>\n</html>",
        escape_html(message)
    )
}

/// Renders the result page: one table per day plus the worker list
pub fn render_result_html(allocation: &Allocation, report: &CoverageReport) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Weekly schedule</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n</head>\n<body>\n");
    html.push_str("<h1>Weekly schedule</h1>\n");
    if allocation.grid.is_empty_assignment() {
        html.push_str("<p>No worker was assigned.</p>\n");
    }
    html.push_str("<div class=\"week\">\n");

    for day in Day::ALL {
        let _ = writeln!(html, "<table class=\"day\">\n<caption>{}</caption>", day);
        for (hour, names) in allocation.grid.day_slots(day) {
            let short = report.understaffed.iter().any(|s| s.day == day && s.hour == hour);
            let class = if short { " class=\"short\"" } else { "" };
            let cell = if names.is_empty() {
                "&mdash;".to_string()
            } else {
                names.iter().map(|n| escape_html(n)).collect::<Vec<_>>().join("<br>")
            };
            let _ = writeln!(html, "<tr{}><th>{}</th><td>{}</td></tr>", class, hour_label(hour), cell);
        }
        html.push_str("</table>\n");
    }

    html.push_str("</div>\n<h2>Workers</h2>\n<table class=\"workers\">\n");
    html.push_str("<tr><th>Name</th><th>Requested</th><th>Assigned</th></tr>\n");
    for worker in &allocation.workers {
        let assigned = allocation.assigned_hours(&worker.name).unwrap_or(0);
        let class = if assigned < worker.target_hours { " class=\"short\"" } else { "" };
        let _ = writeln!(
            html,
            "<tr{}><td>{}</td><td>{}</td><td>{}</td></tr>",
            class,
            escape_html(&worker.name),
            worker.target_hours,
            assigned
        );
    }
    html.push_str("</table>\n");

    let _ = writeln!(
        html,
        "<p>{} of {} slots below target.</p>\n<p><a href=\"/\">New schedule</a></p>\n</body>\n</html>",
        report.understaffed.len(),
        report.total_slots
    );
    html
}

/// Machine-readable plan: submitted roster, coverage and the blocks in commit order
pub fn plan_json(allocation: &Allocation, report: &CoverageReport) -> serde_json::Value {
    let commits: Vec<Commit> = allocation.commits().collect();
    serde_json::json!({
        "roster": allocation.workers,
        "coverage": report,
        "commits": commits,
    })
}
