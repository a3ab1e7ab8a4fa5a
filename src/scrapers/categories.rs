//! Category discovery on the landing page.
//!
//! Three passes, each overlaying the previous one:
//!
//! 1. "Смотреть все" links, named after the nearest heading before them
//! 2. Navigation links whose text mentions a known section keyword
//! 3. The static category set from [`SiteConfig`], always applied

use crate::config::SiteConfig;
use crate::document::{self, Document, HEADINGS};
use crate::error::Result;
use crate::fetcher::PageSource;
use crate::models::CategoryMap;
use crate::utils::{absolutize, char_len, contains_any};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use tracing::{debug, info, instrument};

static SEE_ALL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(?i)смотреть все").ok());

/// Section keywords; a navigation link mentioning one is treated as a category.
const SECTION_KEYWORDS: &[&str] = &[
    "консультации",
    "новости",
    "рекомендации",
    "формы",
    "законодательство",
    "обучение",
    "отвечаем",
];

const MIN_NAV_TEXT: usize = 4;
const MAX_NAV_TEXT: usize = 49;

/// Fetch the landing page and discover its categories.
#[instrument(level = "info", skip_all, fields(origin = %config.origin))]
pub async fn discover<S: PageSource>(source: &S, config: &SiteConfig) -> Result<CategoryMap> {
    let html = source.fetch(&config.origin).await?;
    let categories = extract_categories(&html, config);
    info!(count = categories.len(), "Discovered categories");
    Ok(categories)
}

/// Build the category mapping from landing page markup.
pub fn extract_categories(html: &str, config: &SiteConfig) -> CategoryMap {
    let doc = Document::parse(html);
    let mut categories = CategoryMap::new();

    for (name, url) in see_all_categories(&doc, &config.origin) {
        debug!(%name, %url, "Category from see-all link");
        categories.insert(name, url);
    }

    for (name, url) in keyword_categories(&doc, &config.origin) {
        debug!(%name, %url, "Category from navigation link");
        categories.insert(name, url);
    }

    categories.extend(&config.static_categories);
    categories
}

fn see_all_categories(doc: &Document, origin: &str) -> Vec<(String, String)> {
    let Some(pattern) = &*SEE_ALL else {
        return Vec::new();
    };

    doc.links()
        .filter(|(a, href)| !href.is_empty() && pattern.is_match(&document::text(*a, "")))
        .filter_map(|(a, href)| {
            let parent = a.parent().and_then(ElementRef::wrap)?;
            let heading = doc.find_previous_heading(parent).or_else(|| {
                parent
                    .parent()
                    .and_then(ElementRef::wrap)
                    .and_then(|grandparent| document::find(grandparent, HEADINGS))
            })?;
            Some((document::text(heading, ""), absolutize(origin, href)))
        })
        .collect()
}

fn keyword_categories(doc: &Document, origin: &str) -> Vec<(String, String)> {
    doc.links()
        .filter(|(_, href)| !href.is_empty() && !href.starts_with('#'))
        .filter_map(|(a, href)| {
            let text = document::text(a, "");
            let len = char_len(&text);
            let keep = (MIN_NAV_TEXT..=MAX_NAV_TEXT).contains(&len)
                && contains_any(&text, SECTION_KEYWORDS);
            keep.then(|| (text, absolutize(origin, href)))
        })
        .collect()
}
