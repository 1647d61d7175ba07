// crates/excerpt_preprocessor/src/preprocessor.rs

use once_cell::sync::Lazy;
use regex::Regex;
use snippet_resolver::{fenced_lines, SnippetResolver};

use crate::ExcerptError;

/// Tab stop used when expanding tabs in a reference's indentation.
pub const DEFAULT_TAB_LENGTH: usize = 4;

// `--excerpt-- "repo/name"` or with single quotes, alone on its line.
static EXCERPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<space>[ \t]*)-{2,}excerpt-{2,}[ \t]+(?P<excerpt>"(?:\\"|[^"\n\r])+?"|'(?:\\'|[^'\n\r])+?')[ \t]*\r?$"#,
    )
    .expect("valid excerpt pattern")
});

/// A parsed `--excerpt--` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptReference {
    /// Leading whitespace of the line, tabs expanded.
    pub indent: String,
    pub repo: String,
    pub name: String,
}

/// Parses one line. `Ok(None)` when the line is not an excerpt reference.
pub fn parse_reference(line: &str, tab_length: usize) -> Result<Option<ExcerptReference>, ExcerptError> {
    let caps = match EXCERPT_RE.captures(line) {
        Some(caps) => caps,
        None => return Ok(None),
    };
    let space = caps.name("space").map_or("", |m| m.as_str());
    let quoted = caps.name("excerpt").map_or("", |m| m.as_str());
    let inner = &quoted[1..quoted.len() - 1];

    let parts: Vec<&str> = inner.split('/').collect();
    match parts.as_slice() {
        [repo, name] => Ok(Some(ExcerptReference {
            indent: expand_tabs(space, tab_length),
            repo: repo.to_string(),
            name: name.to_string(),
        })),
        _ => Err(ExcerptError::MalformedReference {
            reference: inner.to_string(),
        }),
    }
}

/// Replaces each tab with spaces up to the next multiple of `tab_length`.
pub fn expand_tabs(text: &str, tab_length: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' if tab_length > 0 => {
                let pad = tab_length - column % tab_length;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\t' => {}
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Line-level markdown preprocessor that swaps `--excerpt--` references for
/// fenced code blocks.
pub struct ExcerptPreprocessor<'a> {
    resolver: &'a SnippetResolver,
    tab_length: usize,
}

impl<'a> ExcerptPreprocessor<'a> {
    pub fn new(resolver: &'a SnippetResolver) -> Self {
        Self {
            resolver,
            tab_length: DEFAULT_TAB_LENGTH,
        }
    }

    pub fn with_tab_length(mut self, tab_length: usize) -> Self {
        self.tab_length = tab_length;
        self
    }

    /// Returns `lines` with every reference expanded. The first failing
    /// reference aborts the page.
    pub fn run<I, S>(&self, lines: I) -> Result<Vec<String>, ExcerptError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for line in lines {
            let line = line.as_ref();
            match self.expand_line(line)? {
                Some(block) => out.extend(block),
                None => out.push(line.to_string()),
            }
        }
        Ok(out)
    }

    /// Same as [`run`](Self::run) over `\n`-separated text. A block replacing
    /// a `\r\n`-terminated reference line has `\r\n` endings too.
    pub fn run_text(&self, text: &str) -> Result<String, ExcerptError> {
        let mut out = Vec::new();
        for line in text.split('\n') {
            let (content, ending) = match line.strip_suffix('\r') {
                Some(content) => (content, "\r"),
                None => (line, ""),
            };
            match self.expand_line(content)? {
                Some(block) => out.extend(block.into_iter().map(|fence| fence + ending)),
                None => out.push(line.to_string()),
            }
        }
        Ok(out.join("\n"))
    }

    fn expand_line(&self, line: &str) -> Result<Option<Vec<String>>, ExcerptError> {
        let reference = match parse_reference(line, self.tab_length)? {
            Some(reference) => reference,
            None => return Ok(None),
        };
        let snippet = self.resolver.snippet(&reference.repo, &reference.name)?;
        tracing::debug!(repo = %reference.repo, name = %reference.name, "expanding excerpt");
        Ok(Some(fenced_lines(snippet, &reference.indent)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_double_and_single_quotes() {
        let double = parse_reference("--excerpt-- \"repo/name\"", 4).unwrap().unwrap();
        assert_eq!(double.repo, "repo");
        assert_eq!(double.name, "name");
        assert_eq!(double.indent, "");

        let single = parse_reference("  ----excerpt--- 'repo/name'", 4).unwrap().unwrap();
        assert_eq!(single.indent, "  ");
        assert_eq!(single.name, "name");
    }

    #[test]
    fn test_trailing_whitespace_and_crlf_are_allowed() {
        assert!(parse_reference("--excerpt-- \"a/b\"  \r", 4).unwrap().is_some());
    }

    #[test]
    fn test_non_reference_lines() {
        for line in [
            "plain text",
            "-excerpt- \"a/b\"",
            "--excerpt--\"a/b\"",
            "--excerpt-- \"a/b\" trailing",
            "text --excerpt-- \"a/b\"",
            "--excerpt-- \"\"",
        ] {
            assert_eq!(parse_reference(line, 4).unwrap(), None, "line: {}", line);
        }
    }

    #[test]
    fn test_reference_must_have_exactly_one_slash() {
        for line in ["--excerpt-- \"noslash\"", "--excerpt-- \"a/b/c\""] {
            assert!(matches!(
                parse_reference(line, 4),
                Err(ExcerptError::MalformedReference { .. })
            ));
        }
    }

    #[test]
    fn test_tab_indent_is_expanded() {
        let reference = parse_reference("\t --excerpt-- \"a/b\"", 4).unwrap().unwrap();
        assert_eq!(reference.indent, "     ");
    }

    #[test]
    fn test_expand_tabs_uses_tab_stops() {
        assert_eq!(expand_tabs("  \t", 4), "    ");
        assert_eq!(expand_tabs("\t\t", 2), "    ");
        assert_eq!(expand_tabs("a\tb", 8), "a       b");
    }
}
