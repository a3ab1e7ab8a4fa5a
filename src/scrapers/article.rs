//! Article page extraction.
//!
//! Title, date and body container are each located with an ordered selector
//! cascade. The container's text-bearing descendants are flattened into
//! [`Fragment`]s, dropping short, repeated and boilerplate text. When that
//! leaves almost nothing, the raw container text is used instead.

use crate::config::SiteConfig;
use crate::document::{self, Document};
use crate::error::Result;
use crate::fetcher::PageSource;
use crate::models::{ArticleContent, Fragment};
use crate::scrapers::first_match;
use crate::utils::{char_len, contains_any, truncate_chars, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

static TITLE: Lazy<Vec<Selector>> = Lazy::new(|| {
    document::compile(&["h1", "h2.title", ".article-title", ".post-title", ".content-title"])
});

static DATE: Lazy<Vec<Selector>> =
    Lazy::new(|| document::compile(&["time", ".date", ".published-date", "[datetime]"]));

static CONTAINER: Lazy<Vec<Selector>> = Lazy::new(|| {
    document::compile(&[
        ".article-content",
        ".post-content",
        ".content",
        "main",
        ".main-content",
        "#content",
        ".text-content",
    ])
});

/// Removed from `<body>` before it is used as the container.
const NON_CONTENT: &[&str] = &["nav", "header", "footer", "aside", "script", "style"];

const TEXT_TAGS: &[&str] = &["p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "div"];

const BOILERPLATE: &[&str] = &[
    "javascript",
    "loading",
    "menu",
    "навигация",
    "войти",
    "регистрация",
];

const MIN_FRAGMENT: usize = 20;
const MIN_RENDERED: usize = 200;
const MIN_RAW: usize = 100;
const RAW_EXCERPT: usize = 2000;

pub const NOT_FOUND: &str = "Не удалось найти содержимое статьи.";

/// Fetch `url` and render its article text.
#[instrument(level = "info", skip(source, config))]
pub async fn fetch_body<S: PageSource>(source: &S, config: &SiteConfig, url: &str) -> Result<String> {
    let html = source.fetch(url).await?;
    let body = extract_article(&html, config);
    info!(chars = char_len(&body), "Extracted article");
    debug!(preview = %truncate_for_log(&body, 160), "Article text");
    Ok(body)
}

/// Render the article contained in `html` as display-ready text.
pub fn extract_article(html: &str, config: &SiteConfig) -> String {
    let mut doc = Document::parse(html);

    let title = first_match(&doc, &TITLE, |e| {
        Some(document::text(e, "")).filter(|t| !t.is_empty())
    })
    .unwrap_or_else(|| config.placeholder_title());

    let date = first_match(&doc, &DATE, |e| {
        let attr = e.value().attr("datetime").filter(|d| !d.is_empty());
        Some(attr.map_or_else(|| document::text(e, ""), str::to_string))
    })
    .unwrap_or_default();

    let has_container = first_match(&doc, &CONTAINER, |_| Some(())).is_some();
    if !has_container {
        let removed = doc.decompose_in_body(NON_CONTENT);
        debug!(removed, "No content container; falling back to <body>");
    }
    let container = match first_match(&doc, &CONTAINER, Some).or_else(|| doc.body()) {
        Some(container) => container,
        None => {
            debug!("No <body> either");
            return format!("📰 {title}\n📅 {date}\n\n{NOT_FOUND}");
        }
    };

    let content = ArticleContent {
        body: flatten(container),
        title,
        date,
    };
    let rendered = content.render();
    if char_len(&rendered) >= MIN_RENDERED {
        return rendered;
    }

    let raw = document::text(container, " ");
    if char_len(&raw) > MIN_RAW {
        debug!(chars = char_len(&rendered), "Short article text; using raw container text");
        format!(
            "📰 {}\n📅 {}\n\n{}...",
            content.title,
            content.date,
            truncate_chars(&raw, RAW_EXCERPT)
        )
    } else {
        rendered
    }
}

/// Text-bearing descendants of `container` as fragments, in document order.
///
/// Nested elements are visited independently, so a `div` wrapping a `p`
/// yields the same text twice; the seen-set keeps only the first.
fn flatten(container: ElementRef<'_>) -> Vec<Fragment> {
    let Some(selector) = document::tag_selector(TEXT_TAGS) else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    let mut fragments = Vec::new();

    for element in container.select(&selector) {
        let text = document::text(element, " ");
        if char_len(&text) <= MIN_FRAGMENT || contains_any(&text, BOILERPLATE) || seen.contains(&text) {
            continue;
        }
        seen.insert(text.clone());

        fragments.push(match element.value().name() {
            "li" => Fragment::ListItem(text),
            _ if document::is_heading(element) => Fragment::Heading(text),
            _ => Fragment::Paragraph(text),
        });
    }
    fragments
}
