// crates/snippet_marker/src/lib.rs

//! Marker syntax shared by the search providers, the parser and the
//! markdown adapters.
//!
//! A snippet is delimited inside a source file by two lines:
//!
//! ```text
//! # code_snippet <id> start <tag>
//! ...
//! # code_snippet <id> end
//! ```
//!
//! Only the `code_snippet ...` tokens are significant; whatever precedes them
//! on the line (usually a comment leader) is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal keyword that opens every marker.
pub const MARKER_KEYWORD: &str = "code_snippet";

/// Pattern handed to the external search tool to list candidate files. Looser
/// than [`START_MARKER_RE`]; the parser makes the final decision.
pub const SEARCH_PATTERN: &str = r"code_snippet [\w-]+ start";

/// Start marker with the identifier and tag captured. The trailing newline is
/// part of the marker so that the body starts on the next line.
pub static START_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"code_snippet ([A-Za-z0-9_-]+) start (\w+)\n").expect("valid start marker pattern")
});

/// Compiled form of [`SEARCH_PATTERN`], used by the in-process walker.
pub static SEARCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(SEARCH_PATTERN).expect("valid search pattern"));

/// A hash-comment marker line inside a captured body, including its line
/// ending. Leading whitespace may span preceding blank lines.
pub static MARKER_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*# code_snippet.*$\n?").expect("valid marker line pattern")
});

/// Builds the end marker text for `id`, e.g. `code_snippet greet end`.
pub fn end_marker(id: &str) -> String {
    format!("{} {} end", MARKER_KEYWORD, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_marker_captures_id_and_tag() {
        let caps = START_MARKER_RE
            .captures("// code_snippet snippet-name start yaml\nbody")
            .unwrap();
        assert_eq!(&caps[1], "snippet-name");
        assert_eq!(&caps[2], "yaml");
    }

    #[test]
    fn start_marker_requires_newline_after_tag() {
        assert!(!START_MARKER_RE.is_match("# code_snippet a start yaml   \n"));
        assert!(!START_MARKER_RE.is_match("# code_snippet a start yaml"));
    }

    #[test]
    fn search_pattern_matches_start_but_not_end() {
        assert!(SEARCH_RE.is_match("# code_snippet greet start python"));
        assert!(!SEARCH_RE.is_match("# code_snippet greet end"));
    }

    #[test]
    fn end_marker_format() {
        assert_eq!(end_marker("greet"), "code_snippet greet end");
    }

    #[test]
    fn marker_line_matches_indented_hash_comment_only() {
        assert!(MARKER_LINE_RE.is_match("    # code_snippet x end\n"));
        assert!(!MARKER_LINE_RE.is_match("// code_snippet x end\n"));
    }
}
