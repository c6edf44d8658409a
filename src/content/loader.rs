//! Content loader - reads authored items from the source directory

use chrono::Local;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::store::StoreError;
use super::{ContentItem, ContentKind, FrontMatter};
use crate::config::SiteConfig;
use crate::helpers::{full_url_for, url_for};

/// Loads content items from the source directory
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
    source_dir: &'a Path,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a SiteConfig, source_dir: &'a Path) -> Self {
        Self { config, source_dir }
    }

    /// Load all posts from `<source>/_posts`, newest first
    pub fn load_posts(&self) -> Result<Vec<ContentItem>, StoreError> {
        let posts_dir = self.source_dir.join("_posts");
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_html_file(path) {
                match self.load_item(path, ContentKind::Post) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::warn!("Failed to load item {:?}: {}", path, e);
                    }
                }
            }
        }

        items.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(items)
    }

    /// Load all pages (HTML files outside `_`-prefixed directories)
    pub fn load_pages(&self) -> Result<Vec<ContentItem>, StoreError> {
        let mut items = Vec::new();

        for entry in WalkDir::new(self.source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            let relative = path.strip_prefix(self.source_dir).unwrap_or(path);
            let first_component = relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str());
            if let Some(first) = first_component {
                if first.starts_with('_') {
                    continue;
                }
            }

            if path.is_file() && is_html_file(path) {
                match self.load_item(path, ContentKind::Page) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::warn!("Failed to load item {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(items)
    }

    /// Load a single item from a source file
    fn load_item(&self, path: &Path, kind: ContentKind) -> Result<ContentItem, StoreError> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        let file_modified = fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok())
            .map(chrono::DateTime::<Local>::from);

        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let title = fm.title.unwrap_or_else(|| stem.clone());
        let slug = fm.slug.unwrap_or_else(|| slug::slugify(&stem));

        let source = path
            .strip_prefix(self.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let item_path = url_for(self.config, &slug);
        let permalink = full_url_for(self.config, &slug);

        let mut item = ContentItem::new(title, date, source);
        item.slug = slug;
        item.kind = kind;
        item.status = fm.status;
        item.body = body.to_string();
        item.author = fm.author;
        item.path = item_path;
        item.permalink = permalink;
        item.categories = fm.categories;
        item.tags = fm.tags;

        Ok(item)
    }
}

/// Check if a file is an HTML source file
fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "html" || e == "htm")
        .unwrap_or(false)
}
