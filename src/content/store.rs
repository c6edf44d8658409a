//! Content store - the lookup seam between the server and authored content

use std::path::PathBuf;
use thiserror::Error;

use super::loader::ContentLoader;
use super::{filters, ContentItem, ContentKind};
use crate::config::SiteConfig;

/// Errors surfaced while reading the content source
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("source directory {0:?} does not exist")]
    MissingSource(PathBuf),

    #[error("failed to read content source: {0}")]
    Io(#[from] std::io::Error),
}

/// The lookup contract the server depends on
pub trait ContentStore {
    /// Find a single item by slug, scoped to a content kind
    fn find_by_slug(&self, slug: &str, kind: ContentKind) -> Option<ContentItem>;

    /// All items of a kind, newest first
    fn all(&self, kind: ContentKind) -> Vec<ContentItem>;

    /// Run the content-rendering pipeline over a raw body
    fn render_content(&self, raw: &str) -> String;
}

/// Disk-backed store over the configured source directory.
///
/// Every lookup re-scans the source directory, so a request always sees the
/// item's current state. No cache, by design: a status flipped to draft on
/// disk stops being served on the very next request.
pub struct SiteStore {
    config: SiteConfig,
    source_dir: PathBuf,
}

impl SiteStore {
    /// Open a store over a source directory
    pub fn open(config: SiteConfig, source_dir: PathBuf) -> Result<Self, StoreError> {
        if !source_dir.exists() {
            return Err(StoreError::MissingSource(source_dir));
        }
        Ok(Self { config, source_dir })
    }

    fn scan(&self, kind: ContentKind) -> Vec<ContentItem> {
        let loader = ContentLoader::new(&self.config, &self.source_dir);
        let result = match kind {
            ContentKind::Post => loader.load_posts(),
            ContentKind::Page => loader.load_pages(),
        };
        match result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Content scan failed: {}", e);
                Vec::new()
            }
        }
    }
}

impl ContentStore for SiteStore {
    fn find_by_slug(&self, slug: &str, kind: ContentKind) -> Option<ContentItem> {
        self.scan(kind).into_iter().find(|item| item.slug == slug)
    }

    fn all(&self, kind: ContentKind) -> Vec<ContentItem> {
        self.scan(kind)
    }

    fn render_content(&self, raw: &str) -> String {
        filters::expand(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_with_post(content: &str) -> (tempfile::TempDir, SiteStore) {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("_posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("post.html"), content).unwrap();
        let store = SiteStore::open(SiteConfig::default(), dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_missing_source() {
        let result = SiteStore::open(SiteConfig::default(), PathBuf::from("/no/such/dir"));
        assert!(matches!(result, Err(StoreError::MissingSource(_))));
    }

    #[test]
    fn test_find_by_slug() {
        let (_dir, store) = store_with_post("---\ntitle: T\nslug: findable\n---\nx");
        assert!(store.find_by_slug("findable", ContentKind::Post).is_some());
        assert!(store.find_by_slug("missing", ContentKind::Post).is_none());
        // kind scoping: the slug only resolves for the kind it belongs to
        assert!(store.find_by_slug("findable", ContentKind::Page).is_none());
    }

    #[test]
    fn test_lookup_sees_current_state() {
        let (dir, store) = store_with_post("---\ntitle: T\nslug: fresh\n---\nold body");
        let first = store.find_by_slug("fresh", ContentKind::Post).unwrap();
        assert!(first.body.contains("old body"));

        fs::write(
            dir.path().join("_posts").join("post.html"),
            "---\ntitle: T\nslug: fresh\n---\nnew body",
        )
        .unwrap();
        let second = store.find_by_slug("fresh", ContentKind::Post).unwrap();
        assert!(second.body.contains("new body"));
    }

    #[test]
    fn test_render_content_expands() {
        let (_dir, store) = store_with_post("---\ntitle: T\n---\nx");
        let out = store.render_content("bare text");
        assert_eq!(out, "<p>bare text</p>\n\n");
    }
}
