//! Site configuration.
//!
//! [`SiteConfig::default`] describes kadrovik.uz: its origin, the browser-like
//! header set sent with every request, the request timeout and the
//! hand-maintained category sets. A YAML file may override any subset of the
//! fields; missing keys keep their defaults.
//!
//! ```yaml
//! origin: "https://kadrovik.uz"
//! timeout_secs: 30
//! headers:
//!   User-Agent: "Mozilla/5.0 (X11; Linux x86_64)"
//! ```

use crate::error::Result;
use crate::models::Category;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

const DEFAULT_ORIGIN: &str = "https://kadrovik.uz";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host without a trailing slash. Relative links are
    /// resolved by prefixing it.
    pub origin: String,
    /// Human-readable site name, used in the placeholder article title.
    pub site_name: String,
    pub timeout_secs: u64,
    /// Headers attached to every request.
    pub headers: BTreeMap<String, String>,
    /// Path segment shared by article links.
    pub publish_segment: String,
    /// Always overlaid on discovered categories.
    pub static_categories: Vec<Category>,
    /// Used in place of discovery when it finds nothing.
    pub fallback_categories: Vec<Category>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let headers = [
            (
                "User-Agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "ru-RU,ru;q=0.8,en-US;q=0.5,en;q=0.3"),
            ("Accept-Encoding", "gzip, deflate"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let static_categories = site_categories(&[
            ("Новые публикации", "/recent_publications/?group=6899"),
            ("Новости", "/recent_publications/?group=6899"),
            ("Лайфхаки кадровика", "/publish/group7347_lifehack_for_kadrovik"),
            ("Справочники", "/services"),
            ("My mehnat", "/publish/group7318_my_mehnat_uz_k4"),
            ("Прием на работу", "/publish/group6525_priem_na_rabotu112"),
            ("Отпуска и отгулы", "/publish/group6566_6"),
        ]);

        let fallback_categories = site_categories(&[
            ("Главная страница", "/"),
            ("Новые публикации", "/recent_publications/?group=6899"),
            ("Лайфхаки кадровика", "/publish/group7347_lifehack_for_kadrovik"),
            ("My mehnat", "/publish/group7318_my_mehnat_uz_k4"),
            ("Прием на работу", "/publish/group6525_priem_na_rabotu112"),
            ("Отпуска и отгулы", "/publish/group6566_6"),
            ("Справочники", "/services"),
        ]);

        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            site_name: "kadrovik.uz".to_string(),
            timeout_secs: 15,
            headers,
            publish_segment: "/publish/".to_string(),
            static_categories,
            fallback_categories,
        }
    }
}

fn site_categories(pairs: &[(&str, &str)]) -> Vec<Category> {
    pairs
        .iter()
        .map(|(name, path)| Category::new(*name, format!("{DEFAULT_ORIGIN}{path}")))
        .collect()
}

impl SiteConfig {
    /// Load overrides from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml(&raw)?;
        info!(origin = %config.origin, "Loaded site configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let mut config: SiteConfig = serde_yaml::from_str(raw)?;
        config.origin = config.origin.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether `url` addresses the landing page itself.
    pub fn is_root(&self, url: &str) -> bool {
        url == self.origin || url.strip_prefix(self.origin.as_str()) == Some("/")
    }

    /// Title used when an article page has no recognizable heading.
    pub fn placeholder_title(&self) -> String {
        format!("Статья с сайта {}", self.site_name)
    }
}
