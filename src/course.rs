//! Course data model.
//!
//! A [`Course`] is the aggregate root the exporter reads from. It is produced
//! upstream (an editor, or a JSON file via [`load_course`]) and is never
//! mutated by the export engine.
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!   "subject": "CSE",
//!   "number": 219,
//!   "title": "Computer Science III",
//!   "semester": "FALL",
//!   "year": 2014,
//!   "starting_monday": "2014-08-25",
//!   "ending_friday": "2014-12-05",
//!   "pages": ["Index", "Syllabus", "Schedule", "Homeworks", "Projects"],
//!   "lecture_days": ["Mon", "Wed"],
//!   "instructor": { "name": "Richard McKenna", "homepage_url": "http://www.cs.stonybrook.edu/~richard" },
//!   "lectures": [{ "topic": "Introduction", "sessions": 2 }],
//!   "assignments": [{ "name": "HW1", "topics": "UML", "date": "2014-09-10" }],
//!   "schedule_items": {
//!     "2014-09-01": { "description": "Labor Day", "link": "http://www.timeanddate.com/holidays/us/labor-day" }
//!   }
//! }
//! ```

use crate::pages::PageKind;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Semester {
    Fall,
    Winter,
    Spring,
    Summer,
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Semester::Fall => "FALL",
            Semester::Winter => "WINTER",
            Semester::Spring => "SPRING",
            Semester::Summer => "SUMMER",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub homepage_url: String,
}

/// A lecture topic spanning `sessions` consecutive lecture days.
///
/// Lectures carry no date: the calendar layout derives one from the
/// lecture's position in [`Course::lectures`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecture {
    pub topic: String,
    pub sessions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub topics: String,
    /// Due date
    pub date: NaiveDate,
}

/// A holiday or cancellation overriding a single calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub subject: String,
    pub number: u32,
    pub title: String,
    pub semester: Semester,
    pub year: i32,
    pub starting_monday: NaiveDate,
    pub ending_friday: NaiveDate,
    /// Published pages. The set ordering is the canonical page order, which
    /// is also the navigation order.
    pub pages: BTreeSet<PageKind>,
    pub lecture_days: Vec<Weekday>,
    pub instructor: Instructor,
    #[serde(default)]
    pub lectures: Vec<Lecture>,
    /// Sorted ascending by due date.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub schedule_items: BTreeMap<NaiveDate, ScheduleItem>,
}

impl Course {
    /// `CSE 219`
    pub fn code(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    /// Export directory name, `CSE219`.
    pub fn dir_name(&self) -> String {
        format!("{}{}", self.subject, self.number)
    }

    pub fn has_page(&self, page: PageKind) -> bool {
        self.pages.contains(&page)
    }

    pub fn is_lecture_day(&self, day: Weekday) -> bool {
        self.lecture_days.contains(&day)
    }

    pub fn schedule_item(&self, date: NaiveDate) -> Option<&ScheduleItem> {
        self.schedule_items.get(&date)
    }
}

/// Load a course from a JSON file.
///
/// Assignments are stably re-sorted by due date, since the calendar layout
/// matches them in a single forward pass. Nothing else is validated.
pub fn load_course(path: &Path) -> Result<Course, CourseError> {
    let content = fs::read_to_string(path)?;
    let mut course: Course = serde_json::from_str(&content)?;
    course.assignments.sort_by_key(|a| a.date);
    Ok(course)
}
