//! Data models produced by the extraction pipeline.
//!
//! - [`Category`] / [`CategoryMap`]: named listing pages discovered on the
//!   landing page
//! - [`ArticleSummary`]: one entry of a listing
//! - [`ArticleContent`]: title, date and body fragments of a single article,
//!   rendered into one display-ready text blob
//!
//! Nothing here is persisted; every value is rebuilt per request.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A named grouping of articles reached through its own listing URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub name: String,
    /// Absolute URL of the listing page.
    pub url: String,
}

impl Category {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Insertion-ordered name → URL mapping.
///
/// Inserting a name that is already present replaces its URL in place, so the
/// last writer wins while the first writer keeps the position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryMap {
    entries: Vec<Category>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) {
        let name = name.into();
        let url = url.into();
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.url = url,
            None => self.entries.push(Category { name, url }),
        }
    }

    /// Overlay `categories` on top of the current entries.
    pub fn extend<'a>(&mut self, categories: impl IntoIterator<Item = &'a Category>) {
        for category in categories {
            self.insert(category.name.clone(), category.url.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.url.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a Category> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = &'a Category>>(iter: I) -> Self {
        let mut map = CategoryMap::new();
        map.extend(iter);
        map
    }
}

/// One article as seen on a listing page.
///
/// `date` is the moment the listing was scraped, not the publication date;
/// listings do not carry a reliable date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    pub title: String,
    /// Absolute URL, unique within one listing.
    pub url: String,
    pub date: DateTime<Local>,
}

impl ArticleSummary {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            date: Local::now(),
        }
    }
}

/// A piece of article body, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Fragment {
    Heading(String),
    ListItem(String),
    Paragraph(String),
}

impl Fragment {
    fn render(&self) -> String {
        match self {
            Fragment::Heading(text) => format!("\n🔸 {text}\n"),
            Fragment::ListItem(text) => format!("• {text}"),
            Fragment::Paragraph(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleContent {
    pub title: String,
    /// Publication date as printed on the page; empty when not found.
    pub date: String,
    pub body: Vec<Fragment>,
}

impl ArticleContent {
    /// Header block followed by the body fragments, one per line.
    pub fn render(&self) -> String {
        let mut parts = vec![format!("📰 {}", self.title)];
        if !self.date.is_empty() {
            parts.push(format!("📅 {}", self.date));
        }
        parts.push(String::new());
        parts.extend(self.body.iter().map(Fragment::render));
        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_map_last_write_wins_in_place() {
        let mut map = CategoryMap::new();
        map.insert("Новости", "https://kadrovik.uz/a");
        map.insert("Формы", "https://kadrovik.uz/b");
        map.insert("Новости", "https://kadrovik.uz/c");

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Новости"), Some("https://kadrovik.uz/c"));
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["Новости", "Формы"]);
    }

    #[test]
    fn test_category_map_serializes_as_list() {
        let map: CategoryMap = [Category::new("Справочники", "https://kadrovik.uz/services")]
            .iter()
            .collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Справочники","url":"https://kadrovik.uz/services"}]"#
        );
    }

    #[test]
    fn test_article_summary_uses_scrape_time() {
        let before = Local::now();
        let summary = ArticleSummary::new("Title", "https://kadrovik.uz/publish/x");
        assert!(summary.date >= before);
        assert!(summary.date <= Local::now());
    }

    #[test]
    fn test_render_with_date() {
        let content = ArticleContent {
            title: "Отпуск".to_string(),
            date: "2025-01-10".to_string(),
            body: vec![
                Fragment::Heading("Порядок".to_string()),
                Fragment::ListItem("Пункт".to_string()),
                Fragment::Paragraph("Текст".to_string()),
            ],
        };
        assert_eq!(
            content.render(),
            "📰 Отпуск\n📅 2025-01-10\n\n\n🔸 Порядок\n\n• Пункт\nТекст"
        );
    }

    #[test]
    fn test_render_without_date_omits_line() {
        let content = ArticleContent {
            title: "Отпуск".to_string(),
            date: String::new(),
            body: vec![Fragment::Paragraph("Текст".to_string())],
        };
        assert_eq!(content.render(), "📰 Отпуск\n\nТекст");
    }
}
