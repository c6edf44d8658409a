//! Tag stripping and HTML entity decoding

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap();
    static ref STYLE_BLOCK: Regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Remove `<script>` and `<style>` elements together with their contents.
///
/// Runs before any other transformation; script and style bodies must never
/// reach the output.
pub fn strip_scripts_and_styles(text: &str) -> String {
    let text = SCRIPT_BLOCK.replace_all(text, "");
    STYLE_BLOCK.replace_all(&text, "").into_owned()
}

/// Remove any markup left over once the conversion rules have run.
///
/// Attributes are discarded with the tags; unconvertable elements (tables,
/// embeds, custom elements) collapse to their plain-text contents.
pub fn strip_tags(text: &str) -> String {
    ANY_TAG.replace_all(text, "").into_owned()
}

/// Decode named and numeric HTML entities into literal characters.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scripts() {
        let html = "before<script type=\"text/javascript\">alert('x');</script>after";
        let out = strip_scripts_and_styles(html);
        assert_eq!(out, "beforeafter");
        assert!(!out.contains("alert"));
    }

    #[test]
    fn test_strip_styles() {
        let html = "a<style>.cls { color: red; }</style>b";
        let out = strip_scripts_and_styles(html);
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_strip_script_spanning_lines() {
        let html = "x<script>\nvar a = 1;\nvar b = 2;\n</script>y";
        assert_eq!(strip_scripts_and_styles(html), "xy");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<div class=\"x\">Hello <span>World</span></div>"), "Hello World");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("&#169; &hellip;"), "\u{a9} \u{2026}");
    }
}
