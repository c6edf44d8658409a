//! HTML head tag helpers

use crate::config::SiteConfig;
use crate::content::ContentItem;

use super::url::{encode_segment, full_url_for};

/// Generate the alternate-representation link tag for a content item
///
/// Points at the sibling Markdown URL of the item's normal page. Returns
/// `None` for drafts and other non-published items, which never advertise
/// an alternate representation.
///
/// # Examples
/// ```ignore
/// markdown_link_tag(&config, &item)
/// // -> <link rel="alternate" type="text/markdown" title="Markdown Version" href="https://example.com/hello-world.md">
/// ```
pub fn markdown_link_tag(config: &SiteConfig, item: &ContentItem) -> Option<String> {
    if !item.is_published() {
        return None;
    }

    let href = full_url_for(config, &format!("{}.md", encode_segment(&item.slug)));
    Some(format!(
        r#"<link rel="alternate" type="text/markdown" title="Markdown Version" href="{}">"#,
        href
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentStatus;
    use chrono::Local;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/".to_string();
        config
    }

    fn test_item() -> ContentItem {
        let mut item = ContentItem::new("Hello World".to_string(), Local::now(), "x.html".into());
        item.permalink = "https://example.com/hello-world".to_string();
        item
    }

    #[test]
    fn test_link_tag_for_published_item() {
        let tag = markdown_link_tag(&test_config(), &test_item()).unwrap();
        assert_eq!(
            tag,
            r#"<link rel="alternate" type="text/markdown" title="Markdown Version" href="https://example.com/hello-world.md">"#
        );
    }

    #[test]
    fn test_no_link_tag_for_draft() {
        let mut item = test_item();
        item.status = ContentStatus::Draft;
        assert!(markdown_link_tag(&test_config(), &item).is_none());
    }
}
