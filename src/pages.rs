//! The five publishable page kinds and their fixed site records.
//!
//! Every page-kind lookup (output file, navbar label, navbar link id, required
//! template slots) goes through [`PageKind::record`], so navigation and the
//! page builders agree on one table.

use crate::template::Slot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A publishable site page. Declaration order is the canonical page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PageKind {
    Index,
    Syllabus,
    Schedule,
    Homeworks,
    Projects,
}

/// Fixed per-page data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRecord {
    /// Output file name, also the navbar link target.
    pub file: &'static str,
    /// Navbar link text.
    pub label: &'static str,
    /// Navbar link element id.
    pub link_id: &'static str,
    /// Slots the page's base template must provide, beyond the shared shell.
    pub content_slots: &'static [Slot],
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Index,
        PageKind::Syllabus,
        PageKind::Schedule,
        PageKind::Homeworks,
        PageKind::Projects,
    ];

    pub fn record(self) -> PageRecord {
        match self {
            PageKind::Index => PageRecord {
                file: "index.html",
                label: "Home",
                link_id: "home_link",
                content_slots: &[Slot::InlinedCourse],
            },
            PageKind::Syllabus => PageRecord {
                file: "syllabus.html",
                label: "Syllabus",
                link_id: "syllabus_link",
                content_slots: &[],
            },
            PageKind::Schedule => PageRecord {
                file: "schedule.html",
                label: "Schedule",
                link_id: "schedule_link",
                content_slots: &[Slot::ScheduleTable],
            },
            PageKind::Homeworks => PageRecord {
                file: "hws.html",
                label: "HWs",
                link_id: "hws_link",
                content_slots: &[Slot::HomeworkTable],
            },
            PageKind::Projects => PageRecord {
                file: "projects.html",
                label: "Projects",
                link_id: "projects_link",
                content_slots: &[],
            },
        }
    }

    pub fn file(self) -> &'static str {
        self.record().file
    }

    pub fn label(self) -> &'static str {
        self.record().label
    }

    /// Every slot the page's template must carry: the shared shell, then the
    /// page's own content slots.
    pub fn required_slots(self) -> impl Iterator<Item = Slot> {
        Slot::SHELL
            .iter()
            .chain(self.record().content_slots.iter())
            .copied()
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
