//! # Course Site
//!
//! A static site exporter for university course homepages. A course (its
//! pages, lectures, assignments and calendar exceptions) is read from JSON
//! and a set of base HTML templates is patched into a small static site:
//!
//! ```text
//! base/*.html + course.json  →  sites/CSE219/{index,syllabus,schedule,hws,projects}.html
//! ```
//!
//! # Pipeline
//!
//! For each page the course publishes:
//!
//! 1. **Load** the page's base template and check it carries every slot the
//!    page needs ([`template`]).
//! 2. **Patch** the shared shell (title, banner, navbar, instructor link) and
//!    the page's own content ([`builders`], [`nav`]). The schedule page is
//!    filled from the calendar layout ([`calendar`]).
//! 3. **Write** the patched tree, indented, to the course directory
//!    ([`export`]).
//!
//! Pages fail independently: a broken template costs its own page, never the
//! rest of the site.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`course`] | Course data model and JSON loading |
//! | [`pages`] | The five page kinds and their fixed file/label/link records |
//! | [`markup`] | Owned HTML element tree and indented serializer |
//! | [`template`] | Base-template loading (html5ever via `scraper`) and typed slots |
//! | [`nav`] | Navbar links |
//! | [`calendar`] | Lecture and due-date layout over Monday–Friday weeks, plus row rendering |
//! | [`builders`] | Per-page patching of loaded templates |
//! | [`export`] | Course directory setup, asset mirroring and page writing |
//! | [`stock`] | Stock base templates rendered with Maud |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Typed Slots Over Ad-Hoc Lookups
//!
//! Builders reach into a template only through [`template::Slot`]. Every
//! slot a page requires is checked at load time, so a template that lost its
//! `div#navbar` fails with a clear error naming the page and the slot.
//!
//! ## Cursor-Passing Calendar Layout
//!
//! The layout engine keeps no mutable state on the course. All allocation
//! state lives in a [`calendar::LayoutCursor`] threaded through
//! [`calendar::plan_day`] and [`calendar::plan_week`], so the same course
//! always lays out the same way and any single week can be tested in
//! isolation.

pub mod builders;
pub mod calendar;
pub mod config;
pub mod course;
pub mod export;
pub mod markup;
pub mod nav;
pub mod output;
pub mod pages;
pub mod stock;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
