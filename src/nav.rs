//! Navigation bar links.

use crate::markup::Element;
use crate::pages::PageKind;
use crate::template::{PageTemplate, Slot, TemplateError};

/// Class for the link to the page being rendered.
pub const CLASS_OPEN_NAV: &str = "open_nav";
/// Class for every other link.
pub const CLASS_NAV: &str = "nav";

/// Renders the navbar link for `page`.
pub fn nav_link(page: PageKind, current: PageKind) -> Element {
    let record = page.record();
    let class = if page == current {
        CLASS_OPEN_NAV
    } else {
        CLASS_NAV
    };
    Element::new("a")
        .with_attr("id", record.link_id)
        .with_attr("href", record.file)
        .with_attr("class", class)
        .with_child(record.label)
}

/// Appends one link per published page, in the given order, to the navbar.
pub fn append_nav_links(
    template: &mut PageTemplate,
    published: impl IntoIterator<Item = PageKind>,
) -> Result<(), TemplateError> {
    let current = template.page();
    let navbar = template.slot_mut(Slot::Navbar)?;
    for page in published {
        navbar.append(nav_link(page, current));
    }
    Ok(())
}
