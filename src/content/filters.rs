//! Content-rendering filters applied before conversion
//!
//! Authored bodies may carry host markup that is not plain HTML: square
//! bracket shortcodes and bare paragraphs separated by blank lines. The
//! store runs [`expand`] over a body before it reaches the conversion
//! pipeline, so the converter only ever sees expanded HTML.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref SHORTCODE_PAIRED: Regex =
        Regex::new(r"(?s)\[([a-z][a-z0-9_-]*)(?:\s[^\]]*)?\](.*?)\[/([a-z][a-z0-9_-]*)\]").unwrap();
    static ref SHORTCODE_SELF: Regex =
        Regex::new(r"\[[a-z][a-z0-9_-]*(?:\s[^\]]*)?/?\]").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();
    static ref BLOCK_OPEN: Regex = Regex::new(
        r"(?i)^<(h[1-6]|p|pre|ul|ol|li|blockquote|table|div|hr|figure|section|article)\b"
    )
    .unwrap();
}

/// Run the full content-rendering pipeline over a raw body.
pub fn expand(raw: &str) -> String {
    autop(&strip_shortcodes(raw))
}

/// Reduce `[name]…[/name]` shortcodes to their inner content and drop
/// self-closing ones entirely; unexpandable host markup must not leak.
pub fn strip_shortcodes(text: &str) -> String {
    let text = SHORTCODE_PAIRED.replace_all(text, |caps: &Captures| {
        if caps[1] == caps[3] {
            caps[2].to_string()
        } else {
            caps[0].to_string()
        }
    });
    SHORTCODE_SELF.replace_all(&text, "").into_owned()
}

/// Wrap bare text blocks in `<p>` tags, turning single newlines inside a
/// block into `<br />`. Blocks already starting with a block-level tag are
/// left alone, as is anything inside `<pre>`.
pub fn autop(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let mut out = String::new();
    let mut in_pre = false;

    for chunk in BLANK_LINES.split(&normalized) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }

        if in_pre || BLOCK_OPEN.is_match(chunk) {
            out.push_str(chunk);
        } else {
            out.push_str("<p>");
            out.push_str(&chunk.replace('\n', "<br />\n"));
            out.push_str("</p>");
        }
        out.push_str("\n\n");

        if chunk.to_ascii_lowercase().contains("<pre") {
            in_pre = true;
        }
        if chunk.to_ascii_lowercase().contains("</pre>") {
            in_pre = false;
        }
    }

    out
}
