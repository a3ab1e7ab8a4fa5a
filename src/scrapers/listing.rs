//! Article listings for a category page.
//!
//! Listing markup differs between sections, so extraction is a cascade:
//!
//! - the landing page is scanned for long `/publish/` links directly
//! - other pages try [`BLOCK_SELECTORS`] in order; the first selector that
//!   matches anything supplies the candidate article blocks
//! - when no selector matches, every `/publish/` link on the page is a
//!   candidate, filtered by text length and a boilerplate blocklist
//!
//! Every path yields at most [`MAX_ARTICLES`] summaries with unique URLs.

use crate::config::SiteConfig;
use crate::document::{self, Document, HEADINGS};
use crate::error::Result;
use crate::fetcher::PageSource;
use crate::models::ArticleSummary;
use crate::utils::{absolutize, char_len, contains_any};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};
use tracing::{debug, info, instrument};

pub const MAX_ARTICLES: usize = 10;

/// Candidate blocks examined when a structural selector matched.
const MAX_BLOCKS: usize = 15;

pub const BLOCK_SELECTORS: &[&str] = &[
    "div.publication-item",
    "div.post-item",
    "article",
    r#"div[class*="article"]"#,
    r#"div[class*="post"]"#,
    r#"div[class*="publication"]"#,
    ".content-item",
    ".news-item",
    ".item",
    r#"[class*="item"]"#,
];

static BLOCKS: Lazy<Vec<Selector>> = Lazy::new(|| document::compile(BLOCK_SELECTORS));

const ROOT_MIN_TITLE: usize = 30;
const BLOCK_MIN_TITLE: usize = 10;
const LINK_MIN_TITLE: usize = 20;

const ROOT_SKIP_TEXT: &[&str] = &["смотреть все", "подробнее", "читать далее", "показать"];
const LINK_SKIP_TEXT: &[&str] = &[
    "смотреть все",
    "подробнее",
    "читать",
    "главная",
    "контакты",
    "показать",
];
const LINK_SKIP_HREF: &[&str] = &["javascript:", "mailto:", "#", "tel:"];

/// Fetch `url` and extract its article summaries.
#[instrument(level = "info", skip(source, config))]
pub async fn list<S: PageSource>(
    source: &S,
    config: &SiteConfig,
    url: &str,
) -> Result<Vec<ArticleSummary>> {
    let html = source.fetch(url).await?;
    let articles = extract_listing(&html, url, config);
    info!(count = articles.len(), "Extracted listing");
    Ok(articles)
}

/// Extract up to [`MAX_ARTICLES`] summaries from listing markup fetched from `url`.
pub fn extract_listing(html: &str, url: &str, config: &SiteConfig) -> Vec<ArticleSummary> {
    let doc = Document::parse(html);

    let mut articles = if config.is_root(url) {
        debug!("Landing page; scanning publish links");
        landing_links(&doc, config)
    } else {
        match BLOCKS.iter().find_map(|selector| {
            let blocks: Vec<_> = doc.select(selector).collect();
            (!blocks.is_empty()).then_some(blocks)
        }) {
            Some(blocks) => {
                debug!(blocks = blocks.len(), "Structural selector matched");
                from_blocks(&blocks, config)
            }
            None => {
                debug!("No structural selector matched; scanning publish links");
                publish_links(&doc, config)
            }
        }
    };

    articles.truncate(MAX_ARTICLES);
    articles
}

fn push_unique(articles: &mut Vec<ArticleSummary>, title: String, url: String) {
    if !articles.iter().any(|a| a.url == url) {
        articles.push(ArticleSummary::new(title, url));
    }
}

fn landing_links(doc: &Document, config: &SiteConfig) -> Vec<ArticleSummary> {
    let mut articles = Vec::new();
    for (a, href) in doc.links() {
        let title = document::text(a, "");
        if href.is_empty()
            || !href.contains(config.publish_segment.as_str())
            || char_len(&title) <= ROOT_MIN_TITLE
            || contains_any(&title, ROOT_SKIP_TEXT)
        {
            continue;
        }
        push_unique(&mut articles, title, absolutize(&config.origin, href));
        if articles.len() >= MAX_ARTICLES {
            break;
        }
    }
    articles
}

fn from_blocks(blocks: &[ElementRef<'_>], config: &SiteConfig) -> Vec<ArticleSummary> {
    let mut articles = Vec::new();
    for block in blocks.iter().take(MAX_BLOCKS) {
        let Some(title_elem) = document::find(*block, HEADINGS).or_else(|| document::find(*block, &["a"]))
        else {
            continue;
        };
        let Some(href) = document::find_link(*block).and_then(|a| a.value().attr("href")) else {
            continue;
        };

        let title = document::text(title_elem, "");
        if href.is_empty() || char_len(&title) <= BLOCK_MIN_TITLE {
            continue;
        }
        push_unique(&mut articles, title, absolutize(&config.origin, href));
        if articles.len() >= MAX_ARTICLES {
            break;
        }
    }
    articles
}

fn publish_links(doc: &Document, config: &SiteConfig) -> Vec<ArticleSummary> {
    let mut articles = Vec::new();
    for (a, href) in doc.links() {
        let title = document::text(a, "");
        if href.is_empty()
            || !href.contains(config.publish_segment.as_str())
            || contains_any(href, LINK_SKIP_HREF)
            || char_len(&title) <= LINK_MIN_TITLE
            || contains_any(&title, LINK_SKIP_TEXT)
        {
            continue;
        }
        push_unique(&mut articles, title, absolutize(&config.origin, href));
        if articles.len() >= MAX_ARTICLES {
            break;
        }
    }
    articles
}
