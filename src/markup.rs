//! Owned markup tree used to patch base templates.
//!
//! Templates are parsed once (see [`crate::template`]) into a [`Document`],
//! an owned tree of [`Element`]s and text. Page builders then locate elements
//! by id or class and append new children, and the site writer serializes the
//! finished tree with [`Document::to_html`].
//!
//! ## Serialization Layout
//!
//! Output is deterministic: attribute order is kept as parsed, and
//! indentation depends only on the tree shape.
//!
//! - An element whose children are all elements is written with one child per
//!   line, indented one level deeper.
//! - An element holding any non-whitespace text (mixed content) is written on
//!   a single line, children inline.
//! - Elements html5ever parses as raw text (`script`, `style`, `noscript`,
//!   `iframe`, ...) are written on a single line with their text verbatim.
//!   `pre` and `textarea` are also kept on one line, text escaped.
//! - Text and attribute values are escaped with `html_escape`.
//! - Whitespace-only text between block children is dropped; the indenter
//!   supplies its own.

use std::fmt::Write as _;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text html5ever parses as raw text (scripting enabled, so
/// `noscript` too). Their text is written back verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements written on one line besides raw-text ones; whitespace is content.
const PRESERVE_ELEMENTS: &[&str] = &["pre", "textarea"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    fn is_blank_text(&self) -> bool {
        // HTML whitespace only; a lone &nbsp; is content.
        matches!(self, Node::Text(t) if t.chars().all(|c| c.is_ascii_whitespace()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attr`].
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`Element::append`].
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute, replacing an existing value in place so attribute
    /// order stays stable.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Append an empty element by tag name, e.g. `br`.
    pub fn append_empty(&mut self, name: &str) {
        self.children.push(Node::Element(Element::new(name)));
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Concatenated text of this element and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// First element in document order (self included) matching `pred`.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(pred))
    }

    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child
                && let Some(found) = el.find_mut(pred)
            {
                return Some(found);
            }
        }
        None
    }

    /// All elements in document order (self included) matching `pred`.
    pub fn find_all<'a>(&'a self, pred: &impl Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_matching(self, pred, &mut found);
        found
    }

    /// First `tag` element whose `id` is `id`.
    pub fn find_by_id_mut(&mut self, tag: &str, id: &str) -> Option<&mut Element> {
        self.find_mut(&|el: &Element| el.name == tag && el.id() == Some(id))
    }

    /// First `tag` element carrying `class`.
    pub fn find_by_class_mut(&mut self, tag: &str, class: &str) -> Option<&mut Element> {
        self.find_mut(&|el: &Element| el.name == tag && el.has_class(class))
    }

    pub fn find_by_id(&self, tag: &str, id: &str) -> Option<&Element> {
        self.find(&|el: &Element| el.name == tag && el.id() == Some(id))
    }

    pub fn find_by_class(&self, tag: &str, class: &str) -> Option<&Element> {
        self.find(&|el: &Element| el.name == tag && el.has_class(class))
    }

    /// Serialize this element and its subtree on a single line.
    pub fn to_inline_html(&self) -> String {
        let mut out = String::new();
        write_inline(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
            Node::Comment(_) => {}
        }
    }
}

fn collect_matching<'a>(
    el: &'a Element,
    pred: &impl Fn(&Element) -> bool,
    found: &mut Vec<&'a Element>,
) {
    if pred(el) {
        found.push(el);
    }
    for child in el.child_elements() {
        collect_matching(child, pred, found);
    }
}

/// A parsed page: the `<html>` root element.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Serialize with a leading doctype, `indent` spaces per nesting level and
    /// a trailing newline.
    pub fn to_html(&self, indent: usize) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        write_block(&self.root, 0, indent, &mut out);
        out
    }
}

// ============================================================================
// Serialization
// ============================================================================

fn is_raw_text(el: &Element) -> bool {
    RAW_TEXT_ELEMENTS.contains(&el.name.as_str())
}

fn write_open_tag(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.name);
    for (name, value) in &el.attrs {
        let _ = write!(out, " {name}=\"");
        html_escape::encode_double_quoted_attribute_to_string(value, out);
        out.push('"');
    }
    out.push('>');
}

fn write_close_tag(el: &Element, out: &mut String) {
    let _ = write!(out, "</{}>", el.name);
}

fn is_void(el: &Element) -> bool {
    VOID_ELEMENTS.contains(&el.name.as_str())
}

fn write_inline(el: &Element, out: &mut String) {
    write_open_tag(el, out);
    if is_void(el) {
        return;
    }
    let raw = is_raw_text(el);
    for child in &el.children {
        match child {
            Node::Element(e) => write_inline(e, out),
            Node::Text(t) if raw => out.push_str(t),
            Node::Text(t) => {
                html_escape::encode_text_to_string(t, out);
            }
            Node::Comment(c) => {
                let _ = write!(out, "<!--{c}-->");
            }
        }
    }
    write_close_tag(el, out);
}

/// Whether `el` must be written on one line.
fn is_inline_block(el: &Element) -> bool {
    is_raw_text(el)
        || PRESERVE_ELEMENTS.contains(&el.name.as_str())
        || el
            .children
            .iter()
            .any(|n| matches!(n, Node::Text(_)) && !n.is_blank_text())
}

fn write_block(el: &Element, depth: usize, indent: usize, out: &mut String) {
    let pad = " ".repeat(depth * indent);
    out.push_str(&pad);

    let has_content = el.children.iter().any(|n| !n.is_blank_text());
    if is_void(el) || is_inline_block(el) || !has_content {
        write_inline(el, out);
        out.push('\n');
        return;
    }

    write_open_tag(el, out);
    out.push('\n');
    for child in &el.children {
        match child {
            Node::Element(e) => write_block(e, depth + 1, indent, out),
            Node::Comment(c) => {
                let _ = writeln!(out, "{}<!--{c}-->", " ".repeat((depth + 1) * indent));
            }
            // Only blank text reaches here; the indenter replaces it.
            Node::Text(_) => {}
        }
    }
    out.push_str(&pad);
    write_close_tag(el, out);
    out.push('\n');
}
