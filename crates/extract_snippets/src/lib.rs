// crates/extract_snippets/src/lib.rs

//! Parses `code_snippet` marker pairs out of a single file's text.
//!
//! Every start marker is tried on its own, so snippets may nest or interleave:
//!
//! ```text
//! # code_snippet a start go      <- a
//! # code_snippet b start go      <- a, b
//! # code_snippet a end           <-    b
//! # code_snippet b end
//! ```
//!
//! A body runs from the line after its start marker up to the line before the
//! *last* matching end marker in the file. Unbalanced markers yield nothing.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use snippet_marker::{end_marker, MARKER_LINE_RE, START_MARKER_RE};

mod dedent;

pub use dedent::dedent;

/// One named fragment extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub name: String,
    /// Language tag, used verbatim on the opening fence.
    pub syntax: String,
    pub body: Vec<String>,
}

/// How many `# code_snippet ...` lines are removed from a captured body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerStrip {
    /// Only the first marker line (leaves e.g. the end marker of a nested
    /// snippet in place).
    #[default]
    First,
    /// Every marker line.
    All,
}

/// Extracts all snippets from `content`, in start-marker order. `\r\n` line
/// endings are read as `\n`.
pub fn parse_snippets(content: &str, strip: MarkerStrip) -> Vec<Snippet> {
    let content = normalize_newlines(content);
    let content = content.as_ref();
    START_MARKER_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            let syntax = caps.get(2)?.as_str();
            let body = captured_body(&content[whole.end()..], name)?;
            Some(Snippet {
                name: name.to_string(),
                syntax: syntax.to_string(),
                body: normalize_body(body, strip),
            })
        })
        .collect()
}

/// Reads `path` and extracts its snippets. The file is closed before
/// returning.
pub fn parse_snippet_file(path: &Path, strip: MarkerStrip) -> io::Result<Vec<Snippet>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_snippets(&content, strip))
}

fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// `rest` starts right after a start marker's newline. Returns the text up to
/// the last newline preceding the last end marker for `name`.
fn captured_body<'a>(rest: &'a str, name: &str) -> Option<&'a str> {
    let end_at = rest.rfind(&end_marker(name))?;
    let newline_at = rest[..end_at].rfind('\n')?;
    Some(&rest[..newline_at])
}

fn normalize_body(body: &str, strip: MarkerStrip) -> Vec<String> {
    let stripped = match strip {
        MarkerStrip::First => MARKER_LINE_RE.replacen(body, 1, ""),
        MarkerStrip::All => MARKER_LINE_RE.replace_all(body, ""),
    };
    dedent(&stripped)
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}
