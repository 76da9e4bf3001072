//! Page builders.
//!
//! Every page starts from its base template and gets the shared shell: the
//! `<title>`, the banner, the navbar and the instructor link. Then the page's
//! own content is filled in:
//!
//! | Page | Content |
//! |------|---------|
//! | Index | `CSE219`-style course identifier in `span#inlined_course` |
//! | Syllabus | none (template as-is) |
//! | Schedule | calendar rows appended to `table#schedule` |
//! | Homeworks | one row per assignment appended to `table.hws` |
//! | Projects | none (template as-is) |

use crate::calendar::render::schedule_rows;
use crate::course::{Assignment, Course};
use crate::markup::{Document, Element};
use crate::nav::append_nav_links;
use crate::pages::PageKind;
use crate::template::{PageTemplate, Slot, TemplateError, TemplateLoader};
use chrono::{Datelike, NaiveDate, Weekday};

pub const CLASS_HWS: &str = "hws";
pub const CRITERIA_PLACEHOLDER: &str = "TBD";

/// Background of the first homework row; each following row steps darker.
const ROW_COLOR_START: [u8; 3] = [240, 240, 255];
const ROW_COLOR_STEP: [u8; 3] = [10, 10, 5];

/// Load `page`'s template and fill it for `course`.
pub fn build_page(
    loader: &TemplateLoader,
    course: &Course,
    page: PageKind,
) -> Result<Document, TemplateError> {
    let mut template = loader.load(page)?;
    fill_shell(&mut template, course)?;
    fill_content(&mut template, course)?;
    Ok(template.into_document())
}

/// Patch the parts every page shares.
pub fn fill_shell(template: &mut PageTemplate, course: &Course) -> Result<(), TemplateError> {
    template.slot_mut(Slot::Title)?.set_text(course.code());

    append_nav_links(template, course.pages.iter().copied())?;

    let banner = template.slot_mut(Slot::Banner)?;
    banner.append_text(format!(
        "{} - {} {}",
        course.code(),
        course.semester,
        course.year
    ));
    banner.append_empty("br");
    banner.append_text(course.title.clone());

    template.slot_mut(Slot::InstructorLink)?.append(
        Element::new("a")
            .with_attr("href", course.instructor.homepage_url.clone())
            .with_child(course.instructor.name.clone()),
    );
    Ok(())
}

fn fill_content(template: &mut PageTemplate, course: &Course) -> Result<(), TemplateError> {
    match template.page() {
        PageKind::Index => {
            template
                .slot_mut(Slot::InlinedCourse)?
                .append_text(course.dir_name());
        }
        PageKind::Schedule => {
            let table = template.slot_mut(Slot::ScheduleTable)?;
            for row in schedule_rows(course) {
                table.append(row);
            }
        }
        PageKind::Homeworks => {
            let table = template.slot_mut(Slot::HomeworkTable)?;
            for (i, assignment) in course.assignments.iter().enumerate() {
                table.append(homework_row(assignment, row_color(i)));
            }
        }
        PageKind::Syllabus | PageKind::Projects => {}
    }
    Ok(())
}

/// Row background for the `index`th homework, clamped at black.
pub fn row_color(index: usize) -> [u8; 3] {
    let steps = u8::try_from(index).unwrap_or(u8::MAX);
    let mut color = ROW_COLOR_START;
    for (channel, step) in color.iter_mut().zip(ROW_COLOR_STEP) {
        *channel = channel.saturating_sub(step.saturating_mul(steps));
    }
    color
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MONDAY",
        Weekday::Tue => "TUESDAY",
        Weekday::Wed => "WEDNESDAY",
        Weekday::Thu => "THURSDAY",
        Weekday::Fri => "FRIDAY",
        Weekday::Sat => "SATURDAY",
        Weekday::Sun => "SUNDAY",
    }
}

/// `WEDNESDAY, 1/17@ 11:59PM`
pub fn format_due(date: NaiveDate) -> String {
    format!(
        "{}, {}/{}@ 11:59PM",
        weekday_name(date.weekday()),
        date.month(),
        date.day()
    )
}

fn padded_cell(text: String) -> Element {
    let mut cell = Element::new("td").with_attr("class", CLASS_HWS);
    cell.append_empty("br");
    cell.append_text(text);
    cell.append_empty("br");
    cell.append_empty("br");
    cell
}

pub fn homework_row(assignment: &Assignment, color: [u8; 3]) -> Element {
    let [r, g, b] = color;
    Element::new("tr")
        .with_attr("style", format!("background-color:rgb({r},{g},{b})"))
        .with_child(padded_cell(format!(
            "{} - {}",
            assignment.name, assignment.topics
        )))
        .with_child(padded_cell(format_due(assignment.date)))
        .with_child(padded_cell(CRITERIA_PLACEHOLDER.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn built(page: PageKind) -> Document {
        let base = setup_base_dir();
        let loader = TemplateLoader::new(base.path(), true);
        build_page(&loader, &sample_course(), page).unwrap()
    }

    #[test]
    fn shell_title_banner_and_instructor() {
        let doc = built(PageKind::Syllabus);
        let title = Slot::Title.locate(&doc.root).unwrap();
        assert_eq!(title.text_content(), "CSE 219");

        let banner = Slot::Banner.locate(&doc.root).unwrap();
        assert_eq!(
            banner.text_content(),
            "CSE 219 - SPRING 2024Computer Science III"
        );
        assert!(banner.child_elements().any(|el| el.name() == "br"));

        let instructor = Slot::InstructorLink.locate(&doc.root).unwrap();
        let link = instructor.find(&|el: &Element| el.name() == "a").unwrap();
        assert_eq!(link.attr("href"), Some("http://example.com/~mckenna"));
        assert_eq!(link.text_content(), "Richard McKenna");
    }

    #[test]
    fn shell_navbar_follows_published_pages() {
        let doc = built(PageKind::Schedule);
        let navbar = Slot::Navbar.locate(&doc.root).unwrap();
        let links: Vec<(&str, &str)> = navbar
            .child_elements()
            .filter(|el| el.name() == "a")
            .map(|a| (a.attr("href").unwrap(), a.attr("class").unwrap()))
            .collect();
        assert_eq!(
            links,
            vec![
                ("index.html", "nav"),
                ("syllabus.html", "nav"),
                ("schedule.html", "open_nav"),
                ("hws.html", "nav"),
                ("projects.html", "nav"),
            ]
        );
    }

    #[test]
    fn index_inlines_course_identifier() {
        let doc = built(PageKind::Index);
        let span = Slot::InlinedCourse.locate(&doc.root).unwrap();
        assert_eq!(span.text_content(), "CSE219");
    }

    #[test]
    fn schedule_table_gets_calendar_rows() {
        let doc = built(PageKind::Schedule);
        let table = Slot::ScheduleTable.locate(&doc.root).unwrap();
        let rows = table.find_all(&|el: &Element| el.name() == "tr");
        assert_eq!(rows.len(), 4);
        assert!(table.find_by_id("span", "Lecture 3").is_some());
        assert!(table.find_by_id("span", "HW1").is_some());
        assert!(table.find_by_id("td", "1_19").is_some());
    }

    #[test]
    fn homework_rows_in_due_order() {
        let mut course = sample_course();
        course.assignments = vec![
            assignment("HW1", "UML", date(2024, 1, 10)),
            assignment("HW2", "Design", date(2024, 1, 17)),
        ];
        let base = setup_base_dir();
        let loader = TemplateLoader::new(base.path(), true);
        let doc = build_page(&loader, &course, PageKind::Homeworks).unwrap();

        let table = Slot::HomeworkTable.locate(&doc.root).unwrap();
        let rows: Vec<&Element> = table
            .find_all(&|el: &Element| el.name() == "tr")
            .into_iter()
            .filter(|tr| tr.attr("style").is_some())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attr("style"), Some("background-color:rgb(240,240,255)"));
        assert_eq!(rows[1].attr("style"), Some("background-color:rgb(230,230,250)"));
        let cells: Vec<String> = rows[1].child_elements().map(|td| td.text_content()).collect();
        assert_eq!(
            cells,
            vec!["HW2 - Design", "WEDNESDAY, 1/17@ 11:59PM", "TBD"]
        );
    }

    #[test]
    fn passthrough_pages_only_get_the_shell() {
        let base = setup_base_dir();
        let loader = TemplateLoader::new(base.path(), true);
        let course = sample_course();
        let mut expected = loader.load(PageKind::Projects).unwrap();
        fill_shell(&mut expected, &course).unwrap();
        let doc = build_page(&loader, &course, PageKind::Projects).unwrap();
        assert_eq!(&doc, expected.document());
    }

    #[test]
    fn missing_slot_fails_the_page() {
        let base = setup_base_dir();
        std::fs::write(base.path().join("hws.html"), MINIMAL_SHELL).unwrap();
        let loader = TemplateLoader::new(base.path(), true);
        let err = build_page(&loader, &sample_course(), PageKind::Homeworks).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MissingSlot {
                slot: Slot::HomeworkTable,
                ..
            }
        ));
    }

    #[test]
    fn row_color_steps_and_saturates() {
        assert_eq!(row_color(0), [240, 240, 255]);
        assert_eq!(row_color(1), [230, 230, 250]);
        assert_eq!(row_color(3), [210, 210, 240]);
        assert_eq!(row_color(30), [0, 0, 105]);
        assert_eq!(row_color(10_000), [0, 0, 0]);
    }

    #[test]
    fn format_due_uses_full_weekday() {
        assert_eq!(format_due(date(2024, 1, 17)), "WEDNESDAY, 1/17@ 11:59PM");
        assert_eq!(format_due(date(2024, 3, 1)), "FRIDAY, 3/1@ 11:59PM");
    }
}
