//! Stock base templates.
//!
//! `course-site gen-templates <DIR>` writes a ready-to-use template directory:
//!
//! ```text
//! base/
//! ├── index.html
//! ├── syllabus.html
//! ├── schedule.html
//! ├── hws.html
//! ├── projects.html
//! ├── css/
//! │   └── course_homepage_layout.css
//! └── images/
//! ```
//!
//! Every template carries the shared shell slots plus its page's content
//! slots, and parses without errors, so it loads under `strict` templates.
//! The stylesheet is embedded at compile time from `static/`.

use crate::pages::PageKind;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const STYLESHEET: &str = include_str!("../static/course_homepage_layout.css");
/// Stylesheet location relative to the template (and exported site) root.
pub const STYLESHEET_PATH: &str = "css/course_homepage_layout.css";

/// Renders the shared page shell around `content`.
fn shell(page: PageKind, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Course " (page.label()) }
                link rel="stylesheet" type="text/css" href=(STYLESHEET_PATH);
            }
            body {
                div id="banner" {}
                div id="navbar" {}
                div id="content" {
                    (content)
                }
                div id="footer" {
                    "Instructor: "
                    span id="instructor_link" {}
                }
            }
        }
    }
}

fn page_content(page: PageKind) -> Markup {
    match page {
        PageKind::Index => html! {
            h2 { "Welcome" }
            p {
                "Announcements and materials for "
                span id="inlined_course" {}
                " are posted on this site."
            }
        },
        PageKind::Syllabus => html! {
            h2 { "Syllabus" }
            p { "Course description, grading and policies." }
        },
        PageKind::Schedule => html! {
            h2 { "Schedule" }
            table id="schedule" {}
        },
        PageKind::Homeworks => html! {
            h2 { "Homework Assignments" }
            table.hws {
                thead {
                    tr {
                        th.hws { "Assignment" }
                        th.hws { "Due" }
                        th.hws { "Criteria" }
                    }
                }
            }
        },
        PageKind::Projects => html! {
            h2 { "Projects" }
            p { "Project descriptions and milestones." }
        },
    }
}

/// The stock base template for `page`.
pub fn stock_template(page: PageKind) -> Markup {
    shell(page, page_content(page))
}

/// Write every stock template, the stylesheet and an empty `images/`
/// directory into `dir`, overwriting existing files. Returns the written
/// files.
pub fn write_stock_templates(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    fs::create_dir_all(dir.join("css"))?;
    fs::create_dir_all(dir.join("images"))?;

    for page in PageKind::ALL {
        let path = dir.join(page.file());
        fs::write(&path, stock_template(page).into_string())?;
        written.push(path);
    }

    let css = dir.join(STYLESHEET_PATH);
    fs::write(&css, STYLESHEET)?;
    written.push(css);
    Ok(written)
}
