//! The ordered transformation pipeline
//!
//! Rules run top to bottom over a single text buffer. The order is
//! load-bearing: code blocks are fenced before the inline rules can touch
//! their contents, inline code runs after links so backticks cannot corrupt
//! link syntax, and list/blockquote bodies strip whatever markup is still
//! standing when they run. Reordering changes output silently, so the
//! sequence is pinned by `test_pipeline_order`.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::entities;

/// One stage of the conversion pipeline.
pub enum Rule {
    /// Regex substitution with a static replacement template.
    Replace {
        name: &'static str,
        pattern: Regex,
        rep: &'static str,
    },
    /// Regex substitution driven by a capture callback.
    Rewrite {
        name: &'static str,
        pattern: Regex,
        apply: fn(&Captures) -> String,
    },
    /// Whole-buffer transformation without a single pattern.
    Pass {
        name: &'static str,
        apply: fn(&str) -> String,
    },
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Replace { name, .. } | Rule::Rewrite { name, .. } | Rule::Pass { name, .. } => {
                name
            }
        }
    }

    /// Apply this rule, returning the rewritten text.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Rule::Replace { pattern, rep, .. } => pattern.replace_all(text, *rep).into_owned(),
            Rule::Rewrite { pattern, apply, .. } => pattern
                .replace_all(text, |caps: &Captures| apply(caps))
                .into_owned(),
            Rule::Pass { apply, .. } => apply(text),
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pipeline pattern")
}

lazy_static! {
    static ref LIST_ITEM: Regex = Regex::new(r"(?is)<li[^>]*>(.*?)</li>").unwrap();
    static ref EXTRA_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();

    /// The conversion pipeline, in application order.
    pub static ref PIPELINE: Vec<Rule> = vec![
        Rule::Pass {
            name: "script-style",
            apply: entities::strip_scripts_and_styles,
        },
        Rule::Replace {
            name: "code-block",
            pattern: re(r"(?is)<pre[^>]*>\s*<code[^>]*>(.*?)</code>\s*</pre>"),
            rep: "\n```\n$1\n```\n",
        },
        Rule::Replace {
            name: "h1",
            pattern: re(r"(?is)<h1[^>]*>(.*?)</h1>"),
            rep: "\n# $1\n",
        },
        Rule::Replace {
            name: "h2",
            pattern: re(r"(?is)<h2[^>]*>(.*?)</h2>"),
            rep: "\n## $1\n",
        },
        Rule::Replace {
            name: "h3",
            pattern: re(r"(?is)<h3[^>]*>(.*?)</h3>"),
            rep: "\n### $1\n",
        },
        Rule::Replace {
            name: "h4",
            pattern: re(r"(?is)<h4[^>]*>(.*?)</h4>"),
            rep: "\n#### $1\n",
        },
        Rule::Replace {
            name: "h5",
            pattern: re(r"(?is)<h5[^>]*>(.*?)</h5>"),
            rep: "\n##### $1\n",
        },
        Rule::Replace {
            name: "h6",
            pattern: re(r"(?is)<h6[^>]*>(.*?)</h6>"),
            rep: "\n###### $1\n",
        },
        // strong/b and em/i stay separate rules so a mismatched pair of one
        // tag name does not break conversion of the other
        Rule::Replace {
            name: "strong",
            pattern: re(r"(?is)<strong[^>]*>(.*?)</strong>"),
            rep: "**$1**",
        },
        Rule::Replace {
            name: "b",
            pattern: re(r"(?is)<b[^>]*>(.*?)</b>"),
            rep: "**$1**",
        },
        Rule::Replace {
            name: "em",
            pattern: re(r"(?is)<em[^>]*>(.*?)</em>"),
            rep: "*$1*",
        },
        Rule::Replace {
            name: "i",
            pattern: re(r"(?is)<i[^>]*>(.*?)</i>"),
            rep: "*$1*",
        },
        Rule::Replace {
            name: "link",
            pattern: re(r#"(?is)<a[^>]+href="([^"]*)"[^>]*>(.*?)</a>"#),
            rep: "[$2]($1)",
        },
        Rule::Replace {
            name: "image-src-alt",
            pattern: re(r#"(?is)<img[^>]+src="([^"]*)"[^>]*alt="([^"]*)"[^>]*/?>"#),
            rep: "![$2]($1)",
        },
        Rule::Replace {
            name: "image-alt-src",
            pattern: re(r#"(?is)<img[^>]+alt="([^"]*)"[^>]*src="([^"]*)"[^>]*/?>"#),
            rep: "![$1]($2)",
        },
        Rule::Replace {
            name: "image",
            pattern: re(r#"(?is)<img[^>]+src="([^"]*)"[^>]*/?>"#),
            rep: "![]($1)",
        },
        Rule::Rewrite {
            name: "ordered-list",
            pattern: re(r"(?is)<ol[^>]*>(.*?)</ol>"),
            apply: ordered_list,
        },
        Rule::Rewrite {
            name: "unordered-list",
            pattern: re(r"(?is)<ul[^>]*>(.*?)</ul>"),
            apply: unordered_list,
        },
        Rule::Rewrite {
            name: "blockquote",
            pattern: re(r"(?is)<blockquote[^>]*>(.*?)</blockquote>"),
            apply: blockquote,
        },
        Rule::Replace {
            name: "line-break",
            pattern: re(r"(?is)<br\s*/?>"),
            rep: "\n",
        },
        Rule::Replace {
            name: "paragraph",
            pattern: re(r"(?is)<p[^>]*>(.*?)</p>"),
            rep: "$1\n\n",
        },
        Rule::Replace {
            name: "horizontal-rule",
            pattern: re(r"(?is)<hr[^>]*/?>"),
            rep: "\n---\n",
        },
        Rule::Replace {
            name: "inline-code",
            pattern: re(r"(?is)<code[^>]*>(.*?)</code>"),
            rep: "`$1`",
        },
        Rule::Pass {
            name: "strip-tags",
            apply: entities::strip_tags,
        },
        Rule::Pass {
            name: "entities",
            apply: entities::decode_entities,
        },
        Rule::Pass {
            name: "whitespace",
            apply: collapse_whitespace,
        },
    ];
}

/// Number the items of an `<ol>` block sequentially from 1.
///
/// Remaining tags inside an item are stripped, so nested lists and nested
/// inline markup flatten to plain text.
fn ordered_list(caps: &Captures) -> String {
    let mut out = String::from("\n");
    for (index, item) in LIST_ITEM.captures_iter(&caps[1]).enumerate() {
        let text = entities::strip_tags(&item[1]);
        out.push_str(&format!("{}. {}\n", index + 1, text.trim()));
    }
    out
}

/// Bullet the items of a `<ul>` block.
fn unordered_list(caps: &Captures) -> String {
    let mut out = String::from("\n");
    for item in LIST_ITEM.captures_iter(&caps[1]) {
        let text = entities::strip_tags(&item[1]);
        out.push_str(&format!("* {}\n", text.trim()));
    }
    out
}

/// Prefix every non-blank line of a blockquote with `> `.
fn blockquote(caps: &Captures) -> String {
    let content = entities::strip_tags(&caps[1]);
    let quoted: Vec<String> = content
        .trim()
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("> {}", line.trim()))
        .collect();
    format!("\n{}\n", quoted.join("\n"))
}

/// Collapse runs of 3+ newlines to exactly 2 and trim the document ends.
fn collapse_whitespace(text: &str) -> String {
    EXTRA_NEWLINES.replace_all(text, "\n\n").trim().to_string()
}
