//! Renders planned weeks as schedule table rows.
//!
//! Each week becomes two `<tr>`s: a header row of weekday names and a row of
//! day cells. Day cells are keyed `id="<month>_<day>"`, lecture markers
//! `id="Lecture <n>"`, and due markers by the assignment name.

use super::{DayContent, DayPlan, WeekPlan, plan_schedule};
use crate::course::{Assignment, Course, ScheduleItem};
use crate::markup::Element;
use chrono::{Datelike, NaiveDate};

pub const CLASS_SCH: &str = "sch";
pub const CLASS_HOLIDAY: &str = "holiday";
pub const CLASS_LECTURE: &str = "lecture";
pub const CLASS_HW: &str = "hw";

pub const DAY_HEADERS: [&str; 5] = ["MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY"];
pub const DUE_TEXT: &str = "due @ 11:59pm";
/// Line breaks padding a holiday cell to the height of a busy day.
pub const HOLIDAY_LINE_BREAKS: usize = 8;

/// `1_8` for January 8th.
pub fn cell_id(date: NaiveDate) -> String {
    format!("{}_{}", date.month(), date.day())
}

/// `1/8` for January 8th.
pub fn cell_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

pub fn lecture_marker_id(number: u32) -> String {
    format!("Lecture {number}")
}

pub fn header_row() -> Element {
    DAY_HEADERS.iter().fold(Element::new("tr"), |row, day| {
        row.with_child(
            Element::new("th")
                .with_attr("class", CLASS_SCH)
                .with_child(*day),
        )
    })
}

pub fn day_cell(day: &DayPlan<'_>) -> Element {
    let mut cell = Element::new("td")
        .with_attr("class", CLASS_SCH)
        .with_attr("id", cell_id(day.date))
        .with_child(Element::new("strong").with_child(cell_label(day.date)));
    cell.append_empty("br");

    match &day.content {
        DayContent::Holiday(item) => fill_holiday(&mut cell, item),
        DayContent::Instructional { lecture, due } => {
            if let Some(session) = lecture {
                let id = lecture_marker_id(session.number);
                cell.append(
                    Element::new("span")
                        .with_attr("class", CLASS_LECTURE)
                        .with_attr("id", id.clone())
                        .with_child(id),
                );
                cell.append_empty("br");
                cell.append_text(session.lecture.topic.clone());
                cell.append_empty("br");
            }
            if let Some(assignment) = due {
                fill_due(&mut cell, assignment);
            }
        }
    }
    cell
}

fn fill_holiday(cell: &mut Element, item: &ScheduleItem) {
    cell.set_attr("class", CLASS_HOLIDAY);
    match &item.link {
        Some(link) => cell.append(
            Element::new("a")
                .with_attr("href", link.clone())
                .with_child(item.description.clone()),
        ),
        None => cell.append_text(item.description.clone()),
    }
    for _ in 0..HOLIDAY_LINE_BREAKS {
        cell.append_empty("br");
    }
}

fn fill_due(cell: &mut Element, assignment: &Assignment) {
    cell.append(
        Element::new("span")
            .with_attr("class", CLASS_HW)
            .with_attr("id", assignment.name.clone())
            .with_child(assignment.name.clone()),
    );
    cell.append_empty("br");
    cell.append_text(DUE_TEXT);
    cell.append_empty("br");
    cell.append_text(format!("({})", assignment.topics));
}

/// Header row and day row for one week.
pub fn week_rows(week: &WeekPlan<'_>) -> [Element; 2] {
    let days = week
        .days
        .iter()
        .fold(Element::new("tr"), |row, day| row.with_child(day_cell(day)));
    [header_row(), days]
}

/// Every schedule row for the course, two per week.
pub fn schedule_rows(course: &Course) -> Vec<Element> {
    plan_schedule(course)
        .iter()
        .flat_map(week_rows)
        .collect()
}
