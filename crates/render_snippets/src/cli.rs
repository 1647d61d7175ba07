// crates/render_snippets/src/cli.rs

use std::path::PathBuf;

use clap::Parser;

use crate::config::SearchBackend;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "render_snippets",
    version,
    about = "Expands code snippet references in documentation pages"
)]
pub struct Cli {
    /// YAML file with `dependent_sections` and rendering options
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind a repository alias to a directory (repeatable)
    #[arg(long = "repo", value_name = "ALIAS=PATH", value_parser = parse_repo_binding)]
    pub repos: Vec<(String, PathBuf)>,

    /// How candidate files are found
    #[arg(long, value_enum)]
    pub search: Option<SearchBackend>,

    /// Search program used by the ripgrep backend
    #[arg(long = "rg", value_name = "PROGRAM")]
    pub rg: Option<String>,

    /// Tab stop for expanding tabs in excerpt indentation
    #[arg(long, value_name = "N")]
    pub tab_length: Option<usize>,

    /// Remove every `# code_snippet` line from bodies, not just the first
    #[arg(long)]
    pub strip_nested_markers: bool,

    /// Write rendered pages here instead of stdout
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Markdown pages to render; stdin when omitted
    #[arg(value_name = "PAGE")]
    pub pages: Vec<PathBuf>,
}

/// Parses `alias=path`.
pub fn parse_repo_binding(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((alias, path)) if !alias.is_empty() && !path.is_empty() => {
            Ok((alias.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected ALIAS=PATH, got {:?}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_binding() {
        assert_eq!(
            parse_repo_binding("docs=../docs=src").unwrap(),
            ("docs".to_string(), PathBuf::from("../docs=src"))
        );
        assert!(parse_repo_binding("docs").is_err());
        assert!(parse_repo_binding("=path").is_err());
        assert!(parse_repo_binding("docs=").is_err());
    }

    #[test]
    fn test_cli_collects_repeated_repos_and_pages() {
        let cli = Cli::parse_from([
            "render_snippets",
            "--repo",
            "a=/a",
            "--repo",
            "b=/b",
            "--search",
            "walk",
            "index.md",
            "guide.md",
        ]);
        assert_eq!(cli.repos.len(), 2);
        assert_eq!(cli.search, Some(SearchBackend::Walk));
        assert_eq!(cli.pages, vec![PathBuf::from("index.md"), PathBuf::from("guide.md")]);
    }
}
