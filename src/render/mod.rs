//! Markdown document rendering
//!
//! Assembles the metadata block and the converted body into the final
//! document. Rendering is a pure function of the item's current state;
//! documents are recomputed on every request and never cached.

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentStore};
use crate::convert::html_to_markdown;
use crate::helpers::format_date;

/// A rendered Markdown document
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    /// Metadata block: title heading, author, date, URL, categories, tags
    pub front_matter: String,
    /// Converted body text
    pub body: String,
}

impl MarkdownDocument {
    /// Concatenate front-matter and body into the final document text
    pub fn to_markdown(&self) -> String {
        format!("{}{}", self.front_matter, self.body)
    }
}

/// Render a content item into a Markdown document.
///
/// The raw body is first run through the store's content-rendering pipeline
/// so the converter only sees expanded HTML.
pub fn render_document(
    item: &ContentItem,
    config: &SiteConfig,
    store: &dyn ContentStore,
) -> MarkdownDocument {
    let mut fm = String::new();

    fm.push_str(&format!("# {}\n\n", item.title));

    let author = item.author.as_deref().unwrap_or(&config.author);
    fm.push_str(&format!("**Author:** {}\n", author));

    let stamp = format_date(
        &item.date,
        &format!("{} {}", config.date_format, config.time_format),
    );
    fm.push_str(&format!("**Published:** {}\n", stamp));
    fm.push_str(&format!("**URL:** {}\n\n", item.permalink));

    if !item.categories.is_empty() {
        fm.push_str(&format!("**Categories:** {}\n", item.categories.join(", ")));
    }
    if !item.tags.is_empty() {
        fm.push_str(&format!("**Tags:** {}\n", item.tags.join(", ")));
    }
    if !item.categories.is_empty() || !item.tags.is_empty() {
        fm.push('\n');
    }

    fm.push_str("---\n\n");

    let expanded = store.render_content(&item.body);
    let body = html_to_markdown(&expanded);

    MarkdownDocument {
        front_matter: fm,
        body,
    }
}
