// SPDX-License-Identifier: PMPL-1.0-or-later
//! Read-only query view over a parsed HTML tree.
//!
//! Rules only ever observe a [`Document`]; nothing here mutates the tree.
//! Parsing is permissive (html5ever via `scraper`) and never fails.
//!
//! Markup that declares its own `<html>` root is parsed as a full document.
//! Anything else is parsed as a fragment: the parser still wraps it in a
//! synthetic `<html>` element, which this view hides from every query.

use crate::error::{Result, ScanError};
use scraper::{ElementRef, Html, Selector};

/// Attribute test used by [`Document::find_all_by_attr`]
#[derive(Debug, Clone, Copy)]
pub enum AttrPredicate<'p> {
    /// Attribute is present, whatever its value
    Present,
    /// Attribute value equals the given string exactly
    Equals(&'p str),
    /// Attribute value is one of the given strings
    OneOf(&'p [&'p str]),
}

impl AttrPredicate<'_> {
    fn matches(&self, value: &str) -> bool {
        match self {
            AttrPredicate::Present => true,
            AttrPredicate::Equals(expected) => value == *expected,
            AttrPredicate::OneOf(set) => set.contains(&value),
        }
    }
}

/// A parsed HTML document or fragment
#[derive(Debug)]
pub struct Document {
    html: Html,
    fragment: bool,
}

impl Document {
    /// Parse markup, choosing document or fragment mode from its structure
    pub fn parse(markup: &str) -> Self {
        let markup = markup.trim_start_matches(BOM);
        if declares_root(markup) {
            Self::parse_document(markup)
        } else {
            Self::parse_fragment(markup)
        }
    }

    /// Parse markup as a full document (an `<html>` root always exists)
    pub fn parse_document(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            fragment: false,
        }
    }

    /// Parse markup as a fragment (no `<html>` root is exposed)
    pub fn parse_fragment(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
            fragment: true,
        }
    }

    /// Whether this view was parsed as a fragment
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// The `<html>` root element, absent for fragments
    pub fn root(&self) -> Option<Element<'_>> {
        if self.fragment {
            None
        } else {
            Some(self.wrap(self.html.root_element()))
        }
    }

    /// Every element in document order
    pub fn elements(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(move |inner| self.wrap(inner))
            .filter(|el| !el.is_synthetic())
    }

    /// Elements whose tag name is any of `tags`, in document order
    pub fn find_all(&self, tags: &[&str]) -> Vec<Element<'_>> {
        self.elements().filter(|el| tags.contains(&el.name())).collect()
    }

    /// First element with the given tag name
    pub fn find_first(&self, tag: &str) -> Option<Element<'_>> {
        self.elements().find(|el| el.name() == tag)
    }

    /// Elements carrying attribute `name` whose value satisfies `predicate`
    pub fn find_all_by_attr(&self, name: &str, predicate: AttrPredicate<'_>) -> Vec<Element<'_>> {
        self.elements()
            .filter(|el| el.attr(name).is_some_and(|v| predicate.matches(v)))
            .collect()
    }

    /// Elements matching a CSS selector, in document order
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        let parsed = Selector::parse(selector)
            .map_err(|e| ScanError::Selector(format!("{}: {}", selector, e)))?;
        Ok(self
            .html
            .select(&parsed)
            .map(|inner| self.wrap(inner))
            .filter(|el| !el.is_synthetic())
            .collect())
    }

    fn wrap<'a>(&'a self, inner: ElementRef<'a>) -> Element<'a> {
        Element {
            inner,
            fragment: self.fragment,
        }
    }
}

const BOM: char = '\u{feff}';

/// Start tags that only occur in a full document
const ROOT_TAGS: &[&str] = &["html", "head", "body"];

/// Elements whose content is text, never markup
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "title"];

/// Whether raw markup brings its own document root.
///
/// A doctype ahead of any content, or an `html`, `head` or `body` start
/// tag anywhere outside comments and raw-text elements, marks a document.
fn declares_root(markup: &str) -> bool {
    let lower = markup.to_ascii_lowercase();
    let mut rest = lower.as_str();
    let mut leading = true;

    while let Some(open) = rest.find('<') {
        if !rest[..open].trim().is_empty() {
            leading = false;
        }
        rest = &rest[open..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        if rest.starts_with("<!doctype") && leading {
            return true;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") || rest.starts_with("</") {
            rest = &rest[tag_end(rest)..];
            continue;
        }

        let name_len = rest[1..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len() - 1);
        if name_len == 0 {
            // a bare '<' in text
            leading = false;
            rest = &rest[1..];
            continue;
        }

        let name = &rest[1..=name_len];
        if ROOT_TAGS.contains(&name) {
            return true;
        }
        leading = false;

        rest = &rest[tag_end(rest)..];
        if RAW_TEXT_TAGS.contains(&name) {
            let close = format!("</{}", name);
            rest = rest.find(&close).map_or("", |end| &rest[end..]);
        }
    }

    false
}

/// Byte offset just past the `>` closing the tag at the start of `tag`,
/// skipping quoted attribute values
fn tag_end(tag: &str) -> usize {
    let mut quote = None;
    for (i, c) in tag.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return i + 1,
            (None, _) => {}
        }
    }
    tag.len()
}

/// Handle to one element of a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
    fragment: bool,
}

impl<'a> Element<'a> {
    /// Lowercase tag name
    pub fn name(&self) -> &'a str {
        self.inner.value().name()
    }

    /// Attribute value, if present
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Attribute value, or `default` when absent
    pub fn get_attr(&self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Attribute present with a non-empty value
    pub fn has_value(&self, name: &str) -> bool {
        self.attr(name).is_some_and(|v| !v.is_empty())
    }

    /// Direct element children (text and comment nodes are skipped)
    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let fragment = self.fragment;
        self.inner
            .children()
            .filter_map(ElementRef::wrap)
            .map(move |inner| Element { inner, fragment })
    }

    /// Enclosing elements, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let fragment = self.fragment;
        self.inner
            .ancestors()
            .filter_map(ElementRef::wrap)
            .map(move |inner| Element { inner, fragment })
            .filter(|el| !el.is_synthetic())
    }

    /// Nearest enclosing element with the given tag name
    pub fn parent_of_type(&self, tag: &str) -> Option<Element<'a>> {
        self.ancestors().find(|el| el.name() == tag)
    }

    /// Descendants (excluding self) whose tag name is any of `tags`
    pub fn find_all(&self, tags: &[&str]) -> Vec<Element<'a>> {
        let fragment = self.fragment;
        self.inner
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(|inner| Element { inner, fragment })
            .filter(|el| tags.contains(&el.name()))
            .collect()
    }

    /// Whether any descendant has the given tag name
    pub fn contains(&self, tag: &str) -> bool {
        self.inner
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .any(|el| el.value().name() == tag)
    }

    /// Markup of the subtree rooted here
    pub fn serialize(&self) -> String {
        self.inner.html()
    }

    // The fragment parser wraps its output in an <html> element hanging
    // directly off the tree root.
    fn is_synthetic(&self) -> bool {
        self.fragment
            && self
                .inner
                .parent()
                .map_or(true, |parent| parent.parent().is_none())
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}
