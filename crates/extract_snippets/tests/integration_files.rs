// crates/extract_snippets/tests/integration_files.rs

use extract_snippets::{parse_snippet_file, MarkerStrip};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_parse_snippet_file_reads_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("testing.go");
    fs::write(
        &path,
        "# code_snippet snippet-name start yaml\nsome: yaml\n# code_snippet snippet-name end\n",
    )
    .unwrap();

    let snippets = parse_snippet_file(&path, MarkerStrip::First).expect("file should parse");
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].name, "snippet-name");
    assert_eq!(snippets[0].syntax, "yaml");
    assert_eq!(snippets[0].body, vec!["some: yaml"]);
}

#[test]
fn test_heredoc_style_indentation_is_removed() {
    // Mirrors a file written with an indented heredoc.
    let dir = tempdir().unwrap();
    let path = dir.path().join("indented.go");
    fs::write(
        &path,
        concat!(
            "            # code_snippet snippet-name start yaml\n",
            "            some: yaml\n",
            "            # code_snippet snippet-name end\n",
        ),
    )
    .unwrap();

    let snippets = parse_snippet_file(&path, MarkerStrip::First).unwrap();
    assert_eq!(snippets[0].body, vec!["some: yaml"]);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let result = parse_snippet_file(&dir.path().join("nope.go"), MarkerStrip::First);
    assert!(result.is_err());
}

#[test]
fn test_windows_line_endings_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("greet.ps1");
    fs::write(
        &path,
        "# code_snippet greet start powershell\r\nWrite-Host hi\r\n# code_snippet greet end\r\n",
    )
    .unwrap();

    let snippets = parse_snippet_file(&path, MarkerStrip::First).unwrap();
    assert_eq!(snippets.len(), 1);
    assert_eq!(snippets[0].syntax, "powershell");
    assert_eq!(snippets[0].body, vec!["Write-Host hi"]);
}
