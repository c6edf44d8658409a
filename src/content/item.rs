//! Content item model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication status of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    #[default]
    #[serde(alias = "publish")]
    Published,
    Private,
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentStatus::Draft => "draft",
            ContentStatus::Published => "published",
            ContentStatus::Private => "private",
        };
        write!(f, "{}", label)
    }
}

/// The content type an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Page,
}

/// A content item authored as rich-text HTML
///
/// Items are constructed by the loader and read-only afterwards; rendering
/// never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Item title
    pub title: String,

    /// URL-safe identifier, unique among published items of its kind
    pub slug: String,

    /// Post or page
    pub kind: ContentKind,

    /// Publication status; only published items are served
    pub status: ContentStatus,

    /// Raw HTML body
    pub body: String,

    /// Author display name (site default applies when absent)
    pub author: Option<String>,

    /// Publication date
    pub date: DateTime<Local>,

    /// URL path (without the site URL)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,

    /// Category names, in authored order
    pub categories: Vec<String>,

    /// Tag names, in authored order
    pub tags: Vec<String>,

    /// Source file path (relative)
    pub source: String,
}

impl ContentItem {
    /// Create a new item with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            title,
            slug,
            kind: ContentKind::Post,
            status: ContentStatus::Published,
            body: String::new(),
            author: None,
            date,
            path: String::new(),
            permalink: String::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            source,
        }
    }

    /// Whether the item may be served publicly
    pub fn is_published(&self) -> bool {
        self.status == ContentStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_new_item_slug() {
        let item = ContentItem::new("Hello World!".to_string(), Local::now(), "x.html".into());
        assert_eq!(item.slug, "hello-world");
        assert!(item.is_published());
    }

    #[test]
    fn test_status_gate() {
        let mut item = ContentItem::new("T".to_string(), Local::now(), "x.html".into());
        item.status = ContentStatus::Draft;
        assert!(!item.is_published());
        item.status = ContentStatus::Private;
        assert!(!item.is_published());
    }

    #[test]
    fn test_status_parsing() {
        let status: ContentStatus = serde_yaml::from_str("draft").unwrap();
        assert_eq!(status, ContentStatus::Draft);
        // the alias used by classic blog exports
        let status: ContentStatus = serde_yaml::from_str("publish").unwrap();
        assert_eq!(status, ContentStatus::Published);
    }
}
