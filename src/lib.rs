//! # kadrovik_scraper
//!
//! Best-effort content extraction for [kadrovik.uz](https://kadrovik.uz), a
//! site whose markup is inconsistent and undocumented. Three stages, each
//! invoked independently with a URL produced by the previous one:
//!
//! 1. **Category discovery**: landing page → named listing URLs
//! 2. **Listing**: category URL → up to 10 article summaries
//! 3. **Article content**: article URL → display-ready text
//!
//! [`Site`] is the public boundary. Its methods never fail: errors are
//! logged through `tracing` and replaced by an empty result (categories,
//! listings) or an explanatory string (article content).
//!
//! ```no_run
//! # async fn run() -> kadrovik_scraper::Result<()> {
//! use kadrovik_scraper::{Site, SiteConfig};
//!
//! let site = Site::new(SiteConfig::default())?;
//! let categories = site.all_categories().await;
//! if let Some(first) = categories.iter().next() {
//!     for article in site.list_articles(&first.url).await {
//!         println!("{}", site.fetch_article_body(&article.url).await);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use config::SiteConfig;
pub use error::{Result, ScrapeError};
pub use fetcher::{HttpFetcher, PageSource};
pub use models::{ArticleContent, ArticleSummary, Category, CategoryMap, Fragment};

use itertools::Itertools;
use scrapers::{article, categories, listing};
use tracing::{error, instrument, warn};

/// One target site plus the page source used to reach it.
#[derive(Debug, Clone)]
pub struct Site<S = HttpFetcher> {
    config: SiteConfig,
    source: S,
}

impl Site<HttpFetcher> {
    /// Site backed by an HTTP client configured from `config`.
    pub fn new(config: SiteConfig) -> Result<Self> {
        let source = HttpFetcher::new(&config)?;
        Ok(Self { config, source })
    }
}

impl<S: PageSource> Site<S> {
    pub fn with_source(config: SiteConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Categories found on the landing page, overlaid with the static set.
    ///
    /// An empty map means discovery failed; see [`Site::all_categories`].
    #[instrument(level = "info", skip(self))]
    pub async fn discover_categories(&self) -> CategoryMap {
        match categories::discover(&self.source, &self.config).await {
            Ok(found) => found,
            Err(e) => {
                error!(error = %e, "Category discovery failed");
                CategoryMap::new()
            }
        }
    }

    /// Discovered categories, or the fallback set when discovery found nothing.
    pub async fn all_categories(&self) -> CategoryMap {
        let found = self.discover_categories().await;
        if found.is_empty() {
            warn!("Using fallback categories");
            self.config.fallback_categories.iter().collect()
        } else {
            found
        }
    }

    /// Up to 10 article summaries from the listing at `url`; empty on failure.
    #[instrument(level = "info", skip(self))]
    pub async fn list_articles(&self, url: &str) -> Vec<ArticleSummary> {
        match listing::list(&self.source, &self.config, url).await {
            Ok(articles) => articles,
            Err(e) => {
                error!(error = %e, %url, "Listing extraction failed");
                Vec::new()
            }
        }
    }

    /// Resolve `name` among [`Site::all_categories`] and list its articles.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::NotFound`] naming the available categories when `name`
    /// is unknown.
    #[instrument(level = "info", skip(self))]
    pub async fn category_articles(&self, name: &str) -> Result<Vec<ArticleSummary>> {
        let categories = self.all_categories().await;
        match categories.get(name) {
            Some(url) => Ok(self.list_articles(url).await),
            None => Err(ScrapeError::NotFound(format!(
                "category '{name}'; available: {}",
                categories.names().join(", ")
            ))),
        }
    }

    /// Formatted article text. Always returns a string, falling back to an
    /// apology that embeds the error.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_article_body(&self, url: &str) -> String {
        match article::fetch_body(&self.source, &self.config, url).await {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, %url, "Article extraction failed");
                format!("Не удалось загрузить содержимое статьи. Ошибка: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::StaticPages;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ORIGIN: &str = "https://kadrovik.uz";

    fn site(pages: StaticPages) -> Site<StaticPages> {
        Site::with_source(SiteConfig::default(), pages)
    }

    #[tokio::test]
    async fn test_discovery_failure_is_empty() {
        let site = site(StaticPages::default());
        assert!(site.discover_categories().await.is_empty());
    }

    #[tokio::test]
    async fn test_all_categories_fallback() {
        let site = site(StaticPages::default());
        let categories = site.all_categories().await;
        assert_eq!(categories.get("Главная страница"), Some("https://kadrovik.uz/"));
        assert_eq!(categories.len(), SiteConfig::default().fallback_categories.len());
    }

    #[tokio::test]
    async fn test_all_categories_uses_discovery() {
        let site = site(StaticPages::default().with(ORIGIN, "<h2>Новости</h2>"));
        let categories = site.all_categories().await;
        assert!(categories.get("Главная страница").is_none());
        assert_eq!(categories.get("Справочники"), Some("https://kadrovik.uz/services"));
    }

    #[tokio::test]
    async fn test_list_articles_failure_is_empty() {
        let site = site(StaticPages::default());
        assert!(site.list_articles("https://kadrovik.uz/publish/nothing").await.is_empty());
        assert!(site.list_articles("::not a url::").await.is_empty());
    }

    #[tokio::test]
    async fn test_listed_urls_are_fetchable() {
        let listing_url = "https://kadrovik.uz/publish/group6525_priem_na_rabotu112";
        let article_url = "https://kadrovik.uz/publish/doc/42";
        let body = concat!(
            "<body><h1>Прием на работу иностранцев</h1><main>",
            "<p>Работодатель заключает трудовой договор в письменной форме.</p>",
            "<p>Перед приемом на работу работник предъявляет паспорт.</p>",
            "<p>Прием на работу оформляется приказом работодателя.</p>",
            "<p>С приказом работник знакомится под подпись в течение трех дней.</p>",
            "</main></body>"
        );
        let site = site(
            StaticPages::default()
                .with(
                    listing_url,
                    r#"<div class="publication-item"><h3>Прием на работу иностранцев</h3><a href="/publish/doc/42">x</a></div>"#,
                )
                .with(article_url, body),
        );

        let articles = site.list_articles(listing_url).await;
        assert_eq!(articles.len(), 1);
        let text = site.fetch_article_body(&articles[0].url).await;
        assert!(text.starts_with("📰 Прием на работу иностранцев\n"));
        assert!(text.contains("трудовой договор"));
    }

    #[tokio::test]
    async fn test_category_articles_unknown_name() {
        let site = site(StaticPages::default());
        let err = site.category_articles("Нет такой").await.unwrap_err();
        assert!(matches!(err, ScrapeError::NotFound(_)));
        assert!(err.to_string().contains("Главная страница"));
    }

    #[tokio::test]
    async fn test_fetch_article_body_never_fails() {
        let site = Site::new(SiteConfig {
            timeout_secs: 2,
            ..SiteConfig::default()
        })
        .unwrap();
        for url in ["", "not a url", "http://127.0.0.1:1/publish/x", "ftp://[::1"] {
            let text = site.fetch_article_body(url).await;
            assert!(
                text.starts_with("Не удалось загрузить содержимое статьи. Ошибка: "),
                "{url}: {text}"
            );
        }
    }

    #[tokio::test]
    async fn test_http_pipeline() {
        let server = MockServer::start().await;
        let origin = server.uri();
        let landing = format!(
            r#"<body><h2>Новости</h2><div><a href="/news">Смотреть все</a></div>
               {}</body>"#,
            (0..12)
                .map(|i| format!(r#"<a href="/publish/doc/{i}">Длинный заголовок публикации на главной {i}</a>"#))
                .collect::<String>()
        );
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(landing))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let site = Site::new(SiteConfig {
            origin: origin.clone(),
            ..SiteConfig::default()
        })
        .unwrap();

        let categories = site.discover_categories().await;
        assert_eq!(categories.get("Новости"), Some("https://kadrovik.uz/recent_publications/?group=6899"));

        let articles = site.list_articles(&format!("{origin}/")).await;
        assert_eq!(articles.len(), 10);
        let urls: HashSet<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls.len(), 10);
        assert!(articles.iter().all(|a| a.url.starts_with(&origin)));

        assert!(site.list_articles(&format!("{origin}/broken")).await.is_empty());
        let text = site.fetch_article_body(&format!("{origin}/broken")).await;
        assert!(text.contains("500"));
    }
}
