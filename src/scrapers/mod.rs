//! Extraction stages for kadrovik.uz.
//!
//! Each stage is split into a synchronous `extract_*` function that works on
//! an already-fetched page (and is what the tests drive), and a fallible
//! async wrapper that fetches the page first. The wrappers are called by
//! [`crate::Site`], which converts every error into the stage's empty value.
//!
//! | Stage | Module | Input | Output |
//! |-------|--------|-------|--------|
//! | Category discovery | [`categories`] | landing page | [`CategoryMap`](crate::models::CategoryMap) |
//! | Listing | [`listing`] | category URL | up to 10 [`ArticleSummary`](crate::models::ArticleSummary) |
//! | Article content | [`article`] | article URL | formatted text |
//!
//! # Selector cascades
//!
//! Unknown page layouts are handled with ordered selector lists: each entry
//! is tried in turn and the first one producing a result wins. See
//! [`first_match`].

use scraper::{ElementRef, Selector};

use crate::document::Document;

pub mod article;
pub mod categories;
pub mod listing;

/// Evaluate `selectors` in order and return the first non-`None` result of
/// `extract` applied to the first element each selector matches.
pub fn first_match<'a, T>(
    doc: &'a Document,
    selectors: &[Selector],
    mut extract: impl FnMut(ElementRef<'a>) -> Option<T>,
) -> Option<T> {
    selectors
        .iter()
        .find_map(|selector| doc.select_one(selector).and_then(&mut extract))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{compile, text};

    #[test]
    fn test_first_match_respects_order() {
        let doc = Document::parse("<div class=\"b\">second</div><div class=\"a\">first</div>");
        let selectors = compile(&[".a", ".b"]);
        let found = first_match(&doc, &selectors, |e| Some(text(e, "")));
        assert_eq!(found.as_deref(), Some("first"));
    }

    #[test]
    fn test_first_match_skips_rejected() {
        let doc = Document::parse("<h1> </h1><div class=\"title\">Заголовок</div>");
        let selectors = compile(&["h1", ".title"]);
        let found = first_match(&doc, &selectors, |e| Some(text(e, "")).filter(|t| !t.is_empty()));
        assert_eq!(found.as_deref(), Some("Заголовок"));
    }

    #[test]
    fn test_first_match_none() {
        let doc = Document::parse("<p>x</p>");
        let selectors = compile(&["main", "#content"]);
        assert!(first_match(&doc, &selectors, |e| Some(e.id())).is_none());
    }
}
