//! Queryable HTML document.
//!
//! [`Document`] wraps [`scraper::Html`] with the handful of traversal
//! primitives the extractors need: CSS selection, tag-list search, the
//! nearest preceding heading, whitespace-normalized text and destructive
//! subtree removal. Parsing is lenient and never fails; malformed markup
//! yields whatever tree html5ever recovers.

use crate::utils::normalize_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Heading tags, `h1` through `h6`.
pub const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

static BODY_TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)<body[\s>/]").ok());

/// Compile a selector list, silently dropping entries that fail to parse.
pub fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
}

/// Selector matching any of `tags`.
pub fn tag_selector(tags: &[&str]) -> Option<Selector> {
    Selector::parse(&tags.join(", ")).ok()
}

pub fn is_heading(element: ElementRef<'_>) -> bool {
    HEADINGS.contains(&element.value().name())
}

/// Text of `element` with every text node stripped and empty ones skipped,
/// joined by `separator`.
pub fn text(element: ElementRef<'_>, separator: &str) -> String {
    normalize_text(element.text(), separator)
}

/// First descendant of `element` whose tag is one of `tags`.
pub fn find<'a>(element: ElementRef<'a>, tags: &[&str]) -> Option<ElementRef<'a>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|e| tags.contains(&e.value().name()))
}

/// First descendant anchor carrying an `href` attribute.
pub fn find_link(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a" && e.value().attr("href").is_some())
}

pub struct Document {
    html: Html,
    has_body: bool,
}

impl Document {
    pub fn parse(raw: &str) -> Self {
        let has_body = (*BODY_TAG).as_ref().is_some_and(|re| re.is_match(raw));
        Self {
            html: Html::parse_document(raw),
            has_body,
        }
    }

    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    pub fn select_one(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// All elements whose tag is one of `tags`, in document order.
    pub fn find_all<'a>(&'a self, tags: &'a [&'a str]) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |e| tags.contains(&e.value().name()))
    }

    /// Every anchor with an `href` attribute, paired with that href.
    pub fn links(&self) -> impl Iterator<Item = (ElementRef<'_>, &str)> {
        self.find_all(&["a"])
            .filter_map(|a| a.value().attr("href").map(|href| (a, href)))
    }

    /// The last heading that starts before `element` in document order.
    pub fn find_previous_heading<'a>(&'a self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let target = element.id();
        let mut last = None;
        for node in self.html.root_element().descendants() {
            if node.id() == target {
                return last;
            }
            if let Some(e) = ElementRef::wrap(node).filter(|e| is_heading(*e)) {
                last = Some(e);
            }
        }
        last
    }

    /// The `<body>` element, if the source markup had one.
    pub fn body(&self) -> Option<ElementRef<'_>> {
        if !self.has_body {
            return None;
        }
        let selector = Selector::parse("body").ok()?;
        self.select_one(&selector)
    }

    /// Detach every element under `<body>` whose tag is in `tags`.
    pub fn decompose_in_body(&mut self, tags: &[&str]) -> usize {
        let ids: Vec<_> = match self.body() {
            Some(body) => body
                .descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .filter(|e| tags.contains(&e.value().name()))
                .map(|e| e.id())
                .collect(),
            None => return 0,
        };
        let mut removed = 0;
        for id in ids {
            if let Some(mut node) = self.html.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
        removed
    }
}
