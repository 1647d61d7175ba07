// crates/snippet_resolver/src/format.rs

use extract_snippets::Snippet;

/// How a resolved snippet is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatMode {
    /// Fenced block with `indent` in front of every line, for the markdown
    /// preprocessor.
    Block { indent: String },
    /// Fenced block surrounded by blank lines, for template tags.
    Inline,
}

impl FormatMode {
    pub fn block(indent: impl Into<String>) -> Self {
        Self::Block {
            indent: indent.into(),
        }
    }
}

/// Opening fence, the body and the closing fence, each prefixed with `indent`.
pub fn fenced_lines(snippet: &Snippet, indent: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(snippet.body.len() + 2);
    lines.push(format!("{}```{}", indent, snippet.syntax));
    lines.extend(snippet.body.iter().map(|line| format!("{}{}", indent, line)));
    lines.push(format!("{}```", indent));
    lines
}

/// `\n\n```<syntax>\n<body>\n```\n\n`
pub fn inline_block(snippet: &Snippet) -> String {
    format!("\n\n```{}\n{}\n```\n\n", snippet.syntax, snippet.body.join("\n"))
}

pub fn format_snippet(snippet: &Snippet, mode: &FormatMode) -> String {
    match mode {
        FormatMode::Block { indent } => fenced_lines(snippet, indent).join("\n"),
        FormatMode::Inline => inline_block(snippet),
    }
}
