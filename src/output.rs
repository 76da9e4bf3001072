//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Export
//!
//! ```text
//! Set up sites/CSE219
//! Home → index.html
//! Syllabus ✗ cannot read template base/syllabus.html: No such file or directory (os error 2)
//! Schedule → schedule.html
//!
//! Exported 2 pages, 1 failed
//! ```
//!
//! ## Check
//!
//! ```text
//! CSE 219 - SPRING 2024: Computer Science III
//! Week 1 (1/8 - 1/12)
//!     Mon 1/8 - Lecture 1: Intro
//!     Tue 1/9
//!     Wed 1/10 - Lecture 2: Intro
//! ...
//! Week 2 (1/15 - 1/19)
//!     Mon 1/15 - Holiday: MLK Day
//!     Wed 1/17 - HW1 due (Basics)
//!
//! Unscheduled assignments
//!     HW2 (2024-01-20)
//!
//! Planned 2 weeks, 3 lecture sessions, 1 of 2 assignments due
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::calendar::render::cell_label;
use crate::calendar::{DayContent, DayPlan, WeekPlan};
use crate::course::Course;
use crate::export::ExportReport;
use chrono::Datelike;
use std::path::{Path, PathBuf};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Export
// ============================================================================

/// Format the result of exporting one course site.
///
/// Successful pages show `label → file`, failed pages `label ✗ error`.
pub fn format_export_report(report: &ExportReport) -> Vec<String> {
    let mut lines = Vec::new();

    if report.setup_performed {
        lines.push(format!("Set up {}", report.course_dir.display()));
    }

    for outcome in &report.pages {
        match &outcome.result {
            Ok(_) => lines.push(format!(
                "{} \u{2192} {}",
                outcome.page,
                outcome.page.file()
            )),
            Err(e) => lines.push(format!("{} \u{2717} {}", outcome.page, e)),
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Exported {}, {} failed",
        plural(report.written(), "page"),
        report.failed()
    ));
    lines
}

/// Print export output to stdout.
pub fn print_export_report(report: &ExportReport) {
    for line in format_export_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

fn day_line(day: &DayPlan<'_>) -> String {
    let mut details = Vec::new();
    match &day.content {
        DayContent::Holiday(item) => details.push(format!("Holiday: {}", item.description)),
        DayContent::Instructional { lecture, due } => {
            if let Some(session) = lecture {
                details.push(format!(
                    "Lecture {}: {}",
                    session.number, session.lecture.topic
                ));
            }
            if let Some(assignment) = due {
                details.push(format!("{} due ({})", assignment.name, assignment.topics));
            }
        }
    }

    let head = format!(
        "{}{} {}",
        indent(1),
        day.date.weekday(),
        cell_label(day.date)
    );
    if details.is_empty() {
        head
    } else {
        format!("{} - {}", head, details.join("; "))
    }
}

/// Format the week-by-week layout of a course without exporting anything.
///
/// Assignments that never land on an instructional day are listed separately
/// since they hold back every later assignment.
pub fn format_schedule_plan(course: &Course, weeks: &[WeekPlan<'_>]) -> Vec<String> {
    let mut lines = vec![format!(
        "{} - {} {}: {}",
        course.code(),
        course.semester,
        course.year,
        course.title
    )];

    let mut sessions = 0;
    let mut due_names = Vec::new();
    for (i, week) in weeks.iter().enumerate() {
        let range = match (week.days.first(), week.days.last()) {
            (Some(first), Some(last)) => {
                format!(" ({} - {})", cell_label(first.date), cell_label(last.date))
            }
            _ => String::new(),
        };
        lines.push(format!("Week {}{}", i + 1, range));
        for day in &week.days {
            if day.lecture().is_some() {
                sessions += 1;
            }
            if let Some(assignment) = day.due() {
                due_names.push(assignment.name.as_str());
            }
            lines.push(day_line(day));
        }
    }

    // Matching is one-at-a-time in due order, so everything past the
    // matched prefix went unscheduled.
    let unscheduled = &course.assignments[due_names.len().min(course.assignments.len())..];
    if !unscheduled.is_empty() {
        lines.push(String::new());
        lines.push("Unscheduled assignments".to_string());
        for assignment in unscheduled {
            lines.push(format!("{}{} ({})", indent(1), assignment.name, assignment.date));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Planned {}, {}, {} of {} due",
        plural(weeks.len(), "week"),
        plural(sessions, "lecture session"),
        due_names.len(),
        plural(course.assignments.len(), "assignment")
    ));
    lines
}

/// Print the schedule plan to stdout.
pub fn print_schedule_plan(course: &Course, weeks: &[WeekPlan<'_>]) {
    for line in format_schedule_plan(course, weeks) {
        println!("{}", line);
    }
}

// ============================================================================
// Stock templates
// ============================================================================

/// Format the files written by `gen-templates`, relative to `dir`.
pub fn format_written_files(dir: &Path, files: &[PathBuf]) -> Vec<String> {
    let mut lines: Vec<String> = files
        .iter()
        .map(|f| {
            let rel = f.strip_prefix(dir).unwrap_or(f);
            format!("Wrote {}", rel.display())
        })
        .collect();
    lines.push(format!(
        "Stock templates in {} ({})",
        dir.display(),
        plural(files.len(), "file")
    ));
    lines
}

pub fn print_written_files(dir: &Path, files: &[PathBuf]) {
    for line in format_written_files(dir, files) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
