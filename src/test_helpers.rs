//! Shared test utilities for the course-site test suite.
//!
//! Provides small constructors for course data, a two-week sample course and
//! template fixtures (an in-memory minimal shell and an on-disk stock template
//! directory).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut course = sample_course();
//! course.schedule_items.insert(date(2024, 1, 15), holiday("MLK Day", None));
//!
//! let base = setup_base_dir();
//! let loader = TemplateLoader::new(base.path(), true);
//! ```

use chrono::{NaiveDate, Weekday};
use tempfile::TempDir;

use crate::course::{Assignment, Course, Instructor, Lecture, ScheduleItem, Semester};
use crate::pages::PageKind;
use crate::stock::write_stock_templates;
use crate::template::{PageTemplate, parse_document};

// =========================================================================
// Course data
// =========================================================================

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid date {year}-{month}-{day}"))
}

pub fn lecture(topic: &str, sessions: u32) -> Lecture {
    Lecture {
        topic: topic.to_string(),
        sessions,
    }
}

pub fn assignment(name: &str, topics: &str, due: NaiveDate) -> Assignment {
    Assignment {
        name: name.to_string(),
        topics: topics.to_string(),
        date: due,
    }
}

pub fn holiday(description: &str, link: Option<&str>) -> ScheduleItem {
    ScheduleItem {
        description: description.to_string(),
        link: link.map(str::to_string),
    }
}

/// CSE 219, Spring 2024, two weeks (Jan 8 - Jan 19), lectures on MWF.
///
/// One three-session lecture ("Intro") fills the first week; HW1 ("Basics")
/// is due Wednesday of the second week. All five pages are published and
/// there are no holidays.
pub fn sample_course() -> Course {
    Course {
        subject: "CSE".to_string(),
        number: 219,
        title: "Computer Science III".to_string(),
        semester: Semester::Spring,
        year: 2024,
        starting_monday: date(2024, 1, 8),
        ending_friday: date(2024, 1, 19),
        pages: PageKind::ALL.into_iter().collect(),
        lecture_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Fri],
        instructor: Instructor {
            name: "Richard McKenna".to_string(),
            homepage_url: "http://example.com/~mckenna".to_string(),
        },
        lectures: vec![lecture("Intro", 3)],
        assignments: vec![assignment("HW1", "Basics", date(2024, 1, 17))],
        schedule_items: Default::default(),
    }
}

// =========================================================================
// Template fixtures
// =========================================================================

/// Smallest document carrying the shared shell slots. Parses without errors.
pub const MINIMAL_SHELL: &str = concat!(
    "<!DOCTYPE html><html><head><title>Base</title></head><body>",
    r#"<div id="banner"></div><div id="navbar"></div>"#,
    r#"<p>Instructor: <span id="instructor_link"></span></p>"#,
    "</body></html>"
);

/// [`MINIMAL_SHELL`] loaded as `page`. Only valid for pages without content
/// slots (Syllabus, Projects).
pub fn shell_template(page: PageKind) -> PageTemplate {
    let (doc, _) = parse_document(MINIMAL_SHELL);
    PageTemplate::new(page, doc).unwrap_or_else(|e| panic!("{page} needs more than the shell: {e}"))
}

/// Write the stock template directory into a temp dir and return it.
pub fn setup_base_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_stock_templates(tmp.path()).unwrap();
    tmp
}
