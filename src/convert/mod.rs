//! HTML to Markdown conversion
//!
//! A deterministic, order-sensitive rewrite of rich-text HTML into readable
//! Markdown. Conversion is single-pass pattern matching over the text, not a
//! parse tree: malformed or unconvertable markup is left partially converted
//! or stripped, and the whole pipeline never fails. Nested structures that
//! Markdown could express (lists in lists, links in emphasis) are flattened
//! on a best-effort basis.

mod entities;
mod rules;

pub use rules::{Rule, PIPELINE};

/// Convert rich-text HTML into Markdown.
///
/// Applies every rule of [`PIPELINE`] in order to an owned text buffer.
pub fn html_to_markdown(html: &str) -> String {
    let mut text = html.to_string();
    for rule in PIPELINE.iter() {
        text = rule.apply(&text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_conversion() {
        let out = html_to_markdown("intro <h2>Title</h2> outro");
        assert!(out.contains("\n## Title\n"));
    }

    #[test]
    fn test_link_conversion() {
        let out = html_to_markdown(r#"<a href="https://x.test">link</a>"#);
        assert_eq!(out, "[link](https://x.test)");
    }

    #[test]
    fn test_image_conversion() {
        assert_eq!(html_to_markdown(r#"<img src="a.png" alt="A">"#), "![A](a.png)");
        assert_eq!(html_to_markdown(r#"<img src="a.png">"#), "![](a.png)");
    }

    #[test]
    fn test_code_fence() {
        let out = html_to_markdown("before<pre><code>foo()</code></pre>after");
        assert!(out.contains("\n```\nfoo()\n```\n"));
    }

    #[test]
    fn test_code_fence_with_whitespace_between_tags() {
        let out = html_to_markdown("<pre>\n  <code>bar()</code>\n</pre>");
        assert!(out.contains("```\nbar()\n```"));
    }

    #[test]
    fn test_code_contents_not_mangled() {
        // markdown metacharacters inside a fenced block survive untouched
        let out = html_to_markdown("<pre><code>a *b* [c](d)</code></pre>");
        assert!(out.contains("a *b* [c](d)"));
    }

    #[test]
    fn test_unordered_list() {
        let out = html_to_markdown("<ul><li>a</li><li>b</li></ul>");
        assert!(out.contains("* a\n* b"));
    }

    #[test]
    fn test_ordered_list() {
        let out = html_to_markdown("<ol><li>x</li><li>y</li><li>z</li></ol>");
        assert!(out.contains("1. x\n2. y\n3. z"));
    }

    #[test]
    fn test_newline_collapse() {
        let out = html_to_markdown("a\n\n\n\n\nb");
        assert_eq!(out, "a\n\nb");
    }

    #[test]
    fn test_script_never_leaks() {
        let out = html_to_markdown("<p>keep</p><script>secret()</script><h2>T</h2>");
        assert!(!out.contains("secret"));
        assert!(out.contains("keep"));
    }

    #[test]
    fn test_style_never_leaks() {
        let out = html_to_markdown("<style>.x{color:red}</style><p>body</p>");
        assert!(!out.contains("color"));
    }

    #[test]
    fn test_bold_inside_link() {
        // bold runs before links, so emphasis inside a link converts first
        let out = html_to_markdown(r#"<a href="/x"><strong>bold link</strong></a>"#);
        assert_eq!(out, "[**bold link**](/x)");
    }

    #[test]
    fn test_entity_decoding() {
        let out = html_to_markdown("<p>fish &amp; chips &copy; 2024</p>");
        assert_eq!(out, "fish & chips \u{a9} 2024");
    }

    #[test]
    fn test_unknown_tags_stripped() {
        let out = html_to_markdown("<table><tr><td>cell</td></tr></table>");
        assert_eq!(out, "cell");
    }

    #[test]
    fn test_plain_text_passes_through_unchanged() {
        // already-converted markdown-like text is stable under a second pass
        let text = "# Title\n\nplain *emphasis* and `code` and [link](/x)";
        assert_eq!(html_to_markdown(text), text);
    }

    #[test]
    fn test_full_document() {
        let html = concat!(
            "<h2>Section</h2>",
            "<p>Intro with <strong>bold</strong> and <a href=\"/ref\">a link</a>.</p>",
            "<ul><li>one</li><li>two</li></ul>",
            "<blockquote>quoted words</blockquote>",
            "<hr>",
            "<p>Closing &ndash; done.</p>",
        );
        let out = html_to_markdown(html);
        assert!(out.starts_with("## Section"));
        assert!(out.contains("Intro with **bold** and [a link](/ref)."));
        assert!(out.contains("* one\n* two"));
        assert!(out.contains("> quoted words"));
        assert!(out.contains("\n---\n"));
        assert!(out.contains("Closing \u{2013} done."));
        assert!(!out.contains('<'));
    }
}
