// crates/extract_snippets/src/dedent.rs

/// Removes the leading whitespace common to every non-blank line.
///
/// Lines made only of spaces and tabs are emptied and do not take part in the
/// margin. Tabs and spaces are not interchangeable: `"\t x"` and `"    x"`
/// share no margin.
pub fn dedent(text: &str) -> String {
    let margin = common_margin(text);
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let (content, ending) = match line.strip_suffix('\n') {
            Some(content) => (content, "\n"),
            None => (line, ""),
        };
        if !is_blank(content) {
            out.push_str(content.strip_prefix(margin).unwrap_or(content));
        }
        out.push_str(ending);
    }
    out
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}

fn leading_whitespace(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}

fn common_margin(text: &str) -> &str {
    let mut margin: Option<&str> = None;
    for line in text.split('\n').filter(|line| !is_blank(line)) {
        let indent = leading_whitespace(line);
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
    }
    margin.unwrap_or("")
}

// Margins only ever hold ASCII spaces and tabs, so byte offsets are char
// boundaries.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_common_indent() {
        assert_eq!(dedent("    a\n      b\n    c"), "a\n  b\nc");
    }

    #[test]
    fn test_blank_lines_are_ignored_and_emptied() {
        assert_eq!(dedent("    a\n  \n\n    b\n"), "a\n\n\nb\n");
    }

    #[test]
    fn test_mixed_tabs_and_spaces_share_only_common_prefix() {
        assert_eq!(dedent("\t  a\n\t b"), "  a\n b");
        assert_eq!(dedent("\tx\n    y"), "\tx\n    y");
    }

    #[test]
    fn test_no_indent_is_unchanged() {
        assert_eq!(dedent("a\n  b"), "a\n  b");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(dedent(""), "");
    }
}
