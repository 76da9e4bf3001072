//! Site export: builds every published page and writes the course site.
//!
//! ## Output Structure
//!
//! ```text
//! sites/
//! └── CSE219/                    # <subject><number>
//!     ├── index.html             # Only pages the course publishes
//!     ├── syllabus.html
//!     ├── schedule.html
//!     ├── hws.html
//!     ├── projects.html
//!     ├── css/                   # Mirrored from base/css/
//!     └── images/                # Mirrored from base/images/
//! ```
//!
//! ## Failure Model
//!
//! The course directory and its assets are set up only when the directory
//! does not exist yet; a failure there aborts the export ([`ExportError`]).
//! After that, each page is built and written independently. A page whose
//! template is missing, malformed or lacks a slot, or whose file cannot be
//! written, is recorded as failed in the [`ExportReport`] and the remaining
//! pages still export. Failed pages are not retried and leave no file behind
//! beyond what a partial write produced.
//!
//! Setup is keyed on the directory's existence alone. If mirroring fails after
//! the course directory was created, the directory stays, and later exports
//! skip setup; remove the directory to mirror the assets again.

use crate::builders::build_page;
use crate::config::SiteConfig;
use crate::course::Course;
use crate::markup::Document;
use crate::pages::PageKind;
use crate::template::{TemplateError, TemplateLoader};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Asset directories mirrored from the template directory on first export.
pub const ASSET_DIRS: [&str; 2] = ["css", "images"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot set up course site {path}: {source}")]
    Setup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of exporting one page.
#[derive(Debug)]
pub struct PageOutcome {
    pub page: PageKind,
    /// Written file on success.
    pub result: Result<PathBuf, PageError>,
}

#[derive(Debug)]
pub struct ExportReport {
    pub course_dir: PathBuf,
    /// Whether this run created the course directory and copied assets.
    pub setup_performed: bool,
    /// One entry per published page, in canonical order.
    pub pages: Vec<PageOutcome>,
}

impl ExportReport {
    pub fn written(&self) -> usize {
        self.pages.iter().filter(|p| p.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.pages.iter().filter(|p| p.result.is_err()).count()
    }
}

/// Serializes finished pages under the sites root.
#[derive(Debug, Clone)]
pub struct SiteWriter {
    sites_dir: PathBuf,
    indent: usize,
}

impl SiteWriter {
    pub fn new(sites_dir: impl Into<PathBuf>, indent: usize) -> Self {
        Self {
            sites_dir: sites_dir.into(),
            indent,
        }
    }

    /// `<sites_dir>/<subject><number>`
    pub fn course_dir(&self, course: &Course) -> PathBuf {
        self.sites_dir.join(course.dir_name())
    }

    pub fn page_path(&self, course: &Course, page: PageKind) -> PathBuf {
        self.course_dir(course).join(page.file())
    }

    /// Create or overwrite `path` with the indented document.
    pub fn write_document(&self, doc: &Document, path: &Path) -> Result<(), PageError> {
        fs::write(path, doc.to_html(self.indent)).map_err(|source| PageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Create the course directory and mirror `css/` and `images/` from the
/// template directory. A missing asset directory mirrors as empty.
pub fn setup_course_site(base_dir: &Path, course_dir: &Path) -> Result<(), ExportError> {
    let setup_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::Setup { path, source }
    };

    fs::create_dir_all(course_dir).map_err(setup_err(course_dir))?;
    for dir in ASSET_DIRS {
        let src = base_dir.join(dir);
        let dst = course_dir.join(dir);
        fs::create_dir_all(&dst).map_err(setup_err(&dst))?;
        if src.is_dir() {
            mirror_dir(&src, &dst).map_err(setup_err(&dst))?;
        } else {
            log::warn!("no {} directory in {}", dir, base_dir.display());
        }
    }
    Ok(())
}

fn mirror_dir(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Builds and writes course sites.
#[derive(Debug, Clone)]
pub struct Exporter {
    loader: TemplateLoader,
    writer: SiteWriter,
}

impl Exporter {
    pub fn new(loader: TemplateLoader, writer: SiteWriter) -> Self {
        Self { loader, writer }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            TemplateLoader::new(&config.base_dir, config.templates.strict),
            SiteWriter::new(&config.sites_dir, config.output.indent),
        )
    }

    pub fn writer(&self) -> &SiteWriter {
        &self.writer
    }

    /// Export every published page of `course`.
    ///
    /// Only setup failures are returned as errors; page failures are
    /// collected in the report.
    pub fn export_site(&self, course: &Course) -> Result<ExportReport, ExportError> {
        let course_dir = self.writer.course_dir(course);
        let setup_performed = !course_dir.exists();
        if setup_performed {
            setup_course_site(self.loader.base_dir(), &course_dir)?;
            log::info!("set up {}", course_dir.display());
        }

        let pages = PageKind::ALL
            .into_iter()
            .filter(|page| course.has_page(*page))
            .map(|page| {
                let result = self.export_page(course, page);
                match &result {
                    Ok(path) => log::info!("wrote {}", path.display()),
                    Err(e) => log::warn!("skipped {} page: {}", page, e),
                }
                PageOutcome { page, result }
            })
            .collect();

        Ok(ExportReport {
            course_dir,
            setup_performed,
            pages,
        })
    }

    /// Build and write a single page.
    pub fn export_page(&self, course: &Course, page: PageKind) -> Result<PathBuf, PageError> {
        let doc = build_page(&self.loader, course, page)?;
        let path = self.writer.page_path(course, page);
        self.writer.write_document(&doc, &path)?;
        Ok(path)
    }
}
