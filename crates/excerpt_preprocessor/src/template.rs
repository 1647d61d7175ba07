// crates/excerpt_preprocessor/src/template.rs

use once_cell::sync::Lazy;
use regex::Regex;
use snippet_resolver::{FormatMode, SnippetError, SnippetResolver};

use crate::ExcerptError;

// {% code_snippet 'repo', 'name' %}, with optional `-` whitespace control.
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\{%(?P<trim_before>-?)\s*code_snippet\s+(?P<repo>"[^"\n]*"|'[^'\n]*')\s*,?\s*(?P<name>"[^"\n]*"|'[^'\n]*')\s*(?P<trim_after>-?)%\}"#,
    )
    .expect("valid template tag pattern")
});

// Any tag naming `code_snippet`, well-formed or not.
static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{%-?\s*code_snippet\b.*?%\}").expect("valid template tag pattern")
});

/// Template callback: the snippet as an inline fenced block surrounded by
/// blank lines.
pub fn code_snippet(resolver: &SnippetResolver, repo: &str, name: &str) -> Result<String, SnippetError> {
    resolver.resolve(repo, name, &FormatMode::Inline)
}

/// Replaces every `code_snippet` tag in `text` with [`code_snippet`]'s output.
/// Text outside the tags is copied unchanged, apart from whitespace removed by
/// `{%-` / `-%}`. A `code_snippet` tag that does not take exactly two quoted
/// arguments is an error.
pub fn expand_template_tags(text: &str, resolver: &SnippetResolver) -> Result<String, ExcerptError> {
    let mut out = String::with_capacity(text.len());
    let mut copied_to = 0;

    for found in ANY_TAG_RE.find_iter(text) {
        let caps = match TAG_RE.captures(found.as_str()) {
            Some(caps) if caps.get(0).map(|m| m.range()) == Some(0..found.len()) => caps,
            _ => {
                return Err(ExcerptError::MalformedTag {
                    tag: found.as_str().to_string(),
                })
            }
        };
        let mut preceding = &text[copied_to..found.start()];
        if has_dash(&caps, "trim_before") {
            preceding = preceding.trim_end();
        }
        out.push_str(preceding);

        let repo = unquote(caps.name("repo").map_or("''", |m| m.as_str()));
        let name = unquote(caps.name("name").map_or("''", |m| m.as_str()));
        tracing::debug!(repo, name, "expanding code_snippet tag");
        out.push_str(&code_snippet(resolver, repo, name)?);

        copied_to = found.end();
        if has_dash(&caps, "trim_after") {
            let rest = &text[copied_to..];
            copied_to += rest.len() - rest.trim_start().len();
        }
    }
    out.push_str(&text[copied_to..]);
    Ok(out)
}

fn has_dash(caps: &regex::Captures<'_>, group: &str) -> bool {
    caps.name(group).is_some_and(|m| m.as_str() == "-")
}

fn unquote(quoted: &str) -> &str {
    &quoted[1..quoted.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_pattern_accepts_both_quote_styles() {
        let caps = TAG_RE
            .captures(r#"{% code_snippet "repo-name", 'snippet-name' %}"#)
            .unwrap();
        assert_eq!(&caps["repo"], "\"repo-name\"");
        assert_eq!(&caps["name"], "'snippet-name'");
    }

    #[test]
    fn test_tag_pattern_rejects_other_tags() {
        assert!(!TAG_RE.is_match("{% include 'header.md' %}"));
        assert!(!ANY_TAG_RE.is_match("{% include 'header.md' %}"));
        assert!(!ANY_TAG_RE.is_match("{% code_snippets 'a', 'b' %}"));
    }

    #[test]
    fn test_any_tag_pattern_sees_malformed_tags() {
        for tag in [
            "{% code_snippet 'only-one' %}",
            "{% code_snippet repo, name %}",
            "{%- code_snippet 'a', 'b', 'c' -%}",
        ] {
            assert!(ANY_TAG_RE.is_match(tag), "tag: {}", tag);
            let caps = TAG_RE.captures(tag);
            assert!(caps.map_or(true, |c| c[0].len() != tag.len()), "tag: {}", tag);
        }
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'abc'"), "abc");
        assert_eq!(unquote("\"\""), "");
    }
}
