//! Base-template loading and typed template slots.
//!
//! Each page kind is exported by patching a base template from the template
//! directory (`base/index.html`, `base/schedule.html`, ...). Templates are
//! parsed with html5ever (through `scraper`) and converted into the crate's
//! own [`Document`] tree.
//!
//! Builders never search the tree directly. They ask a [`PageTemplate`] for a
//! named [`Slot`], and every slot a page needs is checked when the template is
//! loaded, so a template missing `div#navbar` fails up front with
//! [`TemplateError::MissingSlot`] instead of being silently skipped.

use crate::markup::{Document, Element, Node};
use crate::pages::PageKind;
use scraper::{ElementRef, Html};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("cannot read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed template {path}: {}", .errors.join("; "))]
    Malformed { path: PathBuf, errors: Vec<String> },
    #[error("{page} template has no {slot} element")]
    MissingSlot { page: PageKind, slot: Slot },
}

/// A named insertion point in a base template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// `<title>`
    Title,
    /// `div#banner`
    Banner,
    /// `div#navbar`
    Navbar,
    /// `span#instructor_link`
    InstructorLink,
    /// `span#inlined_course` (index page)
    InlinedCourse,
    /// `table#schedule` (schedule page)
    ScheduleTable,
    /// `table.hws` (homeworks page)
    HomeworkTable,
}

enum Locator {
    Tag(&'static str),
    Id(&'static str, &'static str),
    Class(&'static str, &'static str),
}

impl Slot {
    /// Slots every page shares.
    pub const SHELL: &'static [Slot] = &[
        Slot::Title,
        Slot::Banner,
        Slot::Navbar,
        Slot::InstructorLink,
    ];

    fn locator(self) -> Locator {
        match self {
            Slot::Title => Locator::Tag("title"),
            Slot::Banner => Locator::Id("div", "banner"),
            Slot::Navbar => Locator::Id("div", "navbar"),
            Slot::InstructorLink => Locator::Id("span", "instructor_link"),
            Slot::InlinedCourse => Locator::Id("span", "inlined_course"),
            Slot::ScheduleTable => Locator::Id("table", "schedule"),
            Slot::HomeworkTable => Locator::Class("table", "hws"),
        }
    }

    /// First element in `root` filling this slot.
    pub fn locate(self, root: &Element) -> Option<&Element> {
        match self.locator() {
            Locator::Tag(tag) => root.find(&|el: &Element| el.name() == tag),
            Locator::Id(tag, id) => root.find_by_id(tag, id),
            Locator::Class(tag, class) => root.find_by_class(tag, class),
        }
    }

    pub fn locate_mut(self, root: &mut Element) -> Option<&mut Element> {
        match self.locator() {
            Locator::Tag(tag) => root.find_mut(&|el: &Element| el.name() == tag),
            Locator::Id(tag, id) => root.find_by_id_mut(tag, id),
            Locator::Class(tag, class) => root.find_by_class_mut(tag, class),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.locator() {
            Locator::Tag(tag) => write!(f, "{tag}"),
            Locator::Id(tag, id) => write!(f, "{tag}#{id}"),
            Locator::Class(tag, class) => write!(f, "{tag}.{class}"),
        }
    }
}

/// A loaded base template with all of its page's slots present.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    page: PageKind,
    doc: Document,
}

impl PageTemplate {
    /// Wrap a parsed document, checking every slot `page` requires.
    pub fn new(page: PageKind, doc: Document) -> Result<Self, TemplateError> {
        if let Some(slot) = page
            .required_slots()
            .find(|slot| slot.locate(&doc.root).is_none())
        {
            return Err(TemplateError::MissingSlot { page, slot });
        }
        Ok(Self { page, doc })
    }

    pub fn page(&self) -> PageKind {
        self.page
    }

    pub fn slot(&self, slot: Slot) -> Result<&Element, TemplateError> {
        slot.locate(&self.doc.root)
            .ok_or(TemplateError::MissingSlot {
                page: self.page,
                slot,
            })
    }

    pub fn slot_mut(&mut self, slot: Slot) -> Result<&mut Element, TemplateError> {
        let page = self.page;
        slot.locate_mut(&mut self.doc.root)
            .ok_or(TemplateError::MissingSlot { page, slot })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }
}

/// Loads base templates from a template directory.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    base_dir: PathBuf,
    strict: bool,
}

impl TemplateLoader {
    /// With `strict`, any parse error html5ever reports makes the template
    /// [`TemplateError::Malformed`]; otherwise the recovered tree is used.
    pub fn new(base_dir: impl Into<PathBuf>, strict: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            strict,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn template_path(&self, page: PageKind) -> PathBuf {
        self.base_dir.join(page.file())
    }

    pub fn load(&self, page: PageKind) -> Result<PageTemplate, TemplateError> {
        let path = self.template_path(page);
        let source = fs::read_to_string(&path).map_err(|source| TemplateError::Io {
            path: path.clone(),
            source,
        })?;

        let (doc, errors) = parse_document(&source);
        if self.strict && !errors.is_empty() {
            return Err(TemplateError::Malformed { path, errors });
        }
        if !errors.is_empty() {
            log::debug!(
                "{} parsed with {} recovered error(s)",
                path.display(),
                errors.len()
            );
        }
        PageTemplate::new(page, doc)
    }
}

/// Parse an HTML document, returning the tree and any parse errors html5ever
/// recovered from.
pub fn parse_document(source: &str) -> (Document, Vec<String>) {
    let html = Html::parse_document(source);
    let root = convert_element(html.root_element());
    let errors = html.errors.iter().map(|e| e.to_string()).collect();
    (Document::new(root), errors)
}

fn convert_element(source: ElementRef<'_>) -> Element {
    let value = source.value();
    let mut el = Element::new(value.name());
    for (name, val) in value.attrs() {
        el.set_attr(name, val);
    }
    for child in source.children() {
        match child.value() {
            scraper::Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    el.append(convert_element(child_el));
                }
            }
            scraper::Node::Text(text) => el.append_text(&**text),
            scraper::Node::Comment(comment) => el.append(Node::Comment((**comment).to_string())),
            _ => {}
        }
    }
    el
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn parse_document_builds_tree() {
        let (doc, errors) = parse_document(MINIMAL_SHELL);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        assert_eq!(doc.root.name(), "html");
        assert!(doc.root.find_by_id("div", "navbar").is_some());
        assert_eq!(
            doc.root
                .find(&|el: &Element| el.name() == "title")
                .unwrap()
                .text_content(),
            "Base"
        );
    }

    #[test]
    fn parse_document_keeps_attribute_order() {
        let (doc, _) = parse_document(
            r#"<!DOCTYPE html><html><body><a id="x" href="y" class="z">t</a></body></html>"#,
        );
        let a = doc.root.find_by_id("a", "x").unwrap();
        let names: Vec<&str> = a.attrs().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["id", "href", "class"]);
    }

    #[test]
    fn stray_end_tag_is_reported() {
        let (_, errors) =
            parse_document("<!DOCTYPE html><html><head><title>t</title></head><body></span></body></html>");
        assert!(!errors.is_empty());
    }

    const RICH_TEMPLATE: &str = concat!(
        "<!DOCTYPE html><html><head><title>Tom &amp; Jerry</title>",
        "<script>if (a < b && c) { go(); }</script></head><body>",
        "<!-- course banner -->",
        r#"<div id="banner"><p>&nbsp;<br></p></div>"#,
        r#"<noscript><img src="x.png"></noscript>"#,
        r#"<p title="a &quot;b&quot;">a&nbsp;b &lt;c&gt; &amp; d</p>"#,
        "</body></html>"
    );

    /// Copy of `el` without whitespace-only text, which the writer's
    /// indentation replaces.
    fn without_layout_text(el: &Element) -> Element {
        let mut out = Element::new(el.name());
        for (name, value) in el.attrs() {
            out.set_attr(name, value);
        }
        for child in el.children() {
            match child {
                Node::Element(e) => out.append(without_layout_text(e)),
                Node::Text(t) if t.chars().all(|c| c.is_ascii_whitespace()) => {}
                other => out.append(other.clone()),
            }
        }
        out
    }

    #[test]
    fn written_template_parses_back_to_the_same_tree() {
        let (doc, errors) = parse_document(RICH_TEMPLATE);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");

        let html = doc.to_html(2);
        assert!(html.contains(r#"<noscript><img src="x.png"></noscript>"#));
        assert!(html.contains("<script>if (a < b && c) { go(); }</script>"));
        assert!(html.contains("<!-- course banner -->"));
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));

        let (reparsed, _) = parse_document(&html);
        assert_eq!(
            without_layout_text(&reparsed.root),
            without_layout_text(&doc.root)
        );
        // Writing again changes nothing
        assert_eq!(reparsed.to_html(2), html);
    }

    #[test]
    fn noscript_content_survives_as_raw_text() {
        let (doc, _) = parse_document(RICH_TEMPLATE);
        let noscript = doc.root.find(&|el: &Element| el.name() == "noscript").unwrap();
        assert_eq!(noscript.text_content(), r#"<img src="x.png">"#);
        assert!(noscript.child_elements().next().is_none());
    }

    #[test]
    fn slot_display_names_selector() {
        assert_eq!(Slot::Title.to_string(), "title");
        assert_eq!(Slot::Navbar.to_string(), "div#navbar");
        assert_eq!(Slot::HomeworkTable.to_string(), "table.hws");
    }

    #[test]
    fn page_template_requires_shell_slots() {
        let (doc, _) = parse_document(
            "<!DOCTYPE html><html><head><title>t</title></head><body><div id=\"banner\"></div></body></html>",
        );
        let err = PageTemplate::new(PageKind::Syllabus, doc).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MissingSlot {
                slot: Slot::Navbar,
                ..
            }
        ));
    }

    #[test]
    fn page_template_requires_content_slots() {
        let (doc, _) = parse_document(MINIMAL_SHELL);
        // The shell alone is enough for a syllabus page ...
        assert!(PageTemplate::new(PageKind::Syllabus, doc.clone()).is_ok());
        // ... but not for a schedule page.
        let err = PageTemplate::new(PageKind::Schedule, doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schedule template has no table#schedule element"
        );
    }

    #[test]
    fn slot_mut_patches_document() {
        let (doc, _) = parse_document(MINIMAL_SHELL);
        let mut template = PageTemplate::new(PageKind::Projects, doc).unwrap();
        template.slot_mut(Slot::Banner).unwrap().append_text("CSE 219");
        assert_eq!(template.slot(Slot::Banner).unwrap().text_content(), "CSE 219");
        // Slots outside the page's requirements are still looked up, and
        // absence is an error rather than a no-op.
        assert!(matches!(
            template.slot_mut(Slot::ScheduleTable),
            Err(TemplateError::MissingSlot { .. })
        ));
    }

    #[test]
    fn loader_reads_from_base_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("syllabus.html"), MINIMAL_SHELL).unwrap();
        let loader = TemplateLoader::new(tmp.path(), true);
        let template = loader.load(PageKind::Syllabus).unwrap();
        assert_eq!(template.page(), PageKind::Syllabus);
    }

    #[test]
    fn loader_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let loader = TemplateLoader::new(tmp.path(), false);
        let err = loader.load(PageKind::Index).unwrap_err();
        assert!(matches!(err, TemplateError::Io { .. }));
        assert!(err.to_string().contains("index.html"));
    }

    #[test]
    fn strict_loader_rejects_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let broken = MINIMAL_SHELL.replace("</body>", "</span></body>");
        fs::write(tmp.path().join("projects.html"), &broken).unwrap();

        let strict = TemplateLoader::new(tmp.path(), true);
        assert!(matches!(
            strict.load(PageKind::Projects),
            Err(TemplateError::Malformed { .. })
        ));

        let lenient = TemplateLoader::new(tmp.path(), false);
        assert!(lenient.load(PageKind::Projects).is_ok());
    }
}
