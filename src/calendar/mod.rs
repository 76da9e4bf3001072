//! Calendar layout: distributes lecture sessions and assignment due dates
//! over the course's Monday–Friday weeks.
//!
//! ## Algorithm
//!
//! A single forward pass walks the dates from the starting Monday to the
//! ending Friday, five weekdays per week, skipping weekends. All allocation
//! state lives in a [`LayoutCursor`] that is passed into and returned from
//! [`plan_day`] and [`plan_week`], so any week can be planned (and tested) on
//! its own given the cursor it starts from.
//!
//! For each weekday:
//!
//! 1. **Holiday** (the date has a [`ScheduleItem`]): the day shows the
//!    exception only. Lecture and assignment pointers are left untouched, so
//!    a holiday shifts the calendar rather than eating a session.
//! 2. **Instructional day**:
//!    - If the current lecture has no sessions left, advance to the next
//!      lecture (exactly one step per instructional day, lecture weekday or
//!      not) and load its session count.
//!    - On a lecture weekday with sessions left, emit the next numbered
//!      session of the current lecture.
//!    - Independently, if the next unmatched assignment is due on this
//!      day-of-month and month, emit its due marker and move past it.
//!
//! ## Known Quirk: Year-Blind Due Dates
//!
//! Assignment matching compares month and day only. An assignment due on
//! 2025-01-15 matches 2024-01-15 if the course spans both. Because matching
//! is pointer-based, an assignment that never lands on an instructional day
//! (weekend, holiday) is never matched and holds back every later one.
//!
//! Rendering the plan into table rows lives in [`render`].

pub mod render;

use crate::course::{Assignment, Course, Lecture, ScheduleItem};
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The five weekdays of a schedule week, in column order.
pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Allocation state while walking the course dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCursor {
    /// Next date to plan.
    pub date: NaiveDate,
    /// Position in [`Course::lectures`].
    pub lecture_index: usize,
    /// Sessions still to emit for the lecture at `lecture_index`.
    pub sessions_remaining: u32,
    /// Position in [`Course::assignments`].
    pub assignment_index: usize,
    /// Number carried by the next emitted lecture session, starting at 1.
    pub next_lecture_number: u32,
}

impl LayoutCursor {
    /// Cursor at the course's starting Monday, primed with the first
    /// lecture's session count (zero when there are no lectures).
    pub fn start(course: &Course) -> Self {
        Self {
            date: course.starting_monday,
            lecture_index: 0,
            sessions_remaining: course.lectures.first().map_or(0, |l| l.sessions),
            assignment_index: 0,
            next_lecture_number: 1,
        }
    }
}

/// One emitted lecture session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LectureSession<'a> {
    /// Global session number across the whole schedule.
    pub number: u32,
    pub lecture: &'a Lecture,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayContent<'a> {
    Holiday(&'a ScheduleItem),
    Instructional {
        lecture: Option<LectureSession<'a>>,
        due: Option<&'a Assignment>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan<'a> {
    pub date: NaiveDate,
    pub content: DayContent<'a>,
}

impl<'a> DayPlan<'a> {
    pub fn is_holiday(&self) -> bool {
        matches!(self.content, DayContent::Holiday(_))
    }

    pub fn lecture(&self) -> Option<LectureSession<'a>> {
        match self.content {
            DayContent::Instructional { lecture, .. } => lecture,
            DayContent::Holiday(_) => None,
        }
    }

    pub fn due(&self) -> Option<&'a Assignment> {
        match self.content {
            DayContent::Instructional { due, .. } => due,
            DayContent::Holiday(_) => None,
        }
    }
}

/// Monday through Friday of one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekPlan<'a> {
    pub days: Vec<DayPlan<'a>>,
}

impl WeekPlan<'_> {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }
}

fn due_on(assignment: &Assignment, date: NaiveDate) -> bool {
    // Year is deliberately not compared; see the module docs.
    assignment.date.day() == date.day() && assignment.date.month() == date.month()
}

/// Plan the cursor's date and return the cursor for the following day.
pub fn plan_day<'a>(course: &'a Course, cursor: LayoutCursor) -> (DayPlan<'a>, LayoutCursor) {
    let date = cursor.date;
    let mut next = LayoutCursor {
        date: date + Days::new(1),
        ..cursor
    };

    if let Some(item) = course.schedule_item(date) {
        let plan = DayPlan {
            date,
            content: DayContent::Holiday(item),
        };
        return (plan, next);
    }

    let mut lecture = None;
    if next.lecture_index < course.lectures.len() {
        if next.sessions_remaining == 0 {
            next.lecture_index += 1;
            if let Some(l) = course.lectures.get(next.lecture_index) {
                next.sessions_remaining = l.sessions;
            }
        }
        if course.is_lecture_day(date.weekday()) && next.sessions_remaining > 0 {
            lecture = Some(LectureSession {
                number: next.next_lecture_number,
                lecture: &course.lectures[next.lecture_index],
            });
            next.sessions_remaining -= 1;
            next.next_lecture_number += 1;
        }
    }

    let due = course
        .assignments
        .get(next.assignment_index)
        .filter(|a| due_on(a, date));
    if due.is_some() {
        next.assignment_index += 1;
    }

    let plan = DayPlan {
        date,
        content: DayContent::Instructional { lecture, due },
    };
    (plan, next)
}

/// Plan five consecutive days from the cursor, then skip the weekend.
pub fn plan_week<'a>(course: &'a Course, cursor: LayoutCursor) -> (WeekPlan<'a>, LayoutCursor) {
    let mut cursor = cursor;
    let mut days = Vec::with_capacity(WEEKDAYS.len());
    for _ in WEEKDAYS {
        let (day, next) = plan_day(course, cursor);
        days.push(day);
        cursor = next;
    }
    cursor.date = cursor.date + Days::new(2);
    (WeekPlan { days }, cursor)
}

/// Plan every week from the starting Monday through the ending Friday.
pub fn plan_schedule(course: &Course) -> Vec<WeekPlan<'_>> {
    let mut weeks = Vec::new();
    let mut cursor = LayoutCursor::start(course);
    while cursor.date <= course.ending_friday {
        let (week, next) = plan_week(course, cursor);
        log::debug!(
            "planned week of {}: lecture {} ({} sessions left), assignment {}",
            cursor.date,
            next.lecture_index,
            next.sessions_remaining,
            next.assignment_index
        );
        weeks.push(week);
        cursor = next;
    }
    weeks
}
