// crates/render_snippets/src/lib.rs

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use excerpt_preprocessor::{expand_template_tags, ExcerptError, ExcerptPreprocessor};
use find_snippet_files::{FileSearch, RipgrepSearch, WalkDirSearch};
use snippet_resolver::SnippetResolver;

pub mod cli;
pub mod config;
pub mod logging;

use config::{AppConfig, SearchBackend};

/// Builds the resolver for one invocation. All pages rendered with it share
/// one snippet cache.
pub fn build_resolver(config: &AppConfig) -> SnippetResolver {
    let search: Box<dyn FileSearch> = match config.search {
        SearchBackend::Ripgrep => Box::new(RipgrepSearch::new(&config.search_program)),
        SearchBackend::Walk => Box::new(WalkDirSearch::new()),
    };
    SnippetResolver::new(config.repositories.clone(), search).with_marker_strip(config.marker_strip)
}

/// Renders one page: template tags first, then `--excerpt--` lines.
pub fn render_page(text: &str, resolver: &SnippetResolver, tab_length: usize) -> Result<String, ExcerptError> {
    let expanded = expand_template_tags(text, resolver)?;
    ExcerptPreprocessor::new(resolver)
        .with_tab_length(tab_length)
        .run_text(&expanded)
}

/// Renders every configured page, or stdin to stdout when there are none.
///
/// A page that fails is reported and skipped; the error returned at the end
/// counts the failures.
pub fn run(config: &AppConfig) -> Result<()> {
    let resolver = build_resolver(config);
    tracing::debug!(repositories = resolver.registry().len(), "snippet resolver ready");

    if config.pages.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read page from stdin")?;
        let rendered = render_page(&text, &resolver, config.tab_length)?;
        io::stdout()
            .write_all(rendered.as_bytes())
            .context("Failed to write rendered page")?;
        return Ok(());
    }

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut failed = 0;
    for page in &config.pages {
        if let Err(err) = render_file(page, &resolver, config) {
            eprintln!("Error rendering {}: {:#}", page.display(), err);
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(anyhow!(
            "{} of {} page(s) failed to render",
            failed,
            config.pages.len()
        ));
    }
    Ok(())
}

fn render_file(page: &Path, resolver: &SnippetResolver, config: &AppConfig) -> Result<()> {
    let text = fs::read_to_string(page)
        .with_context(|| format!("Failed to read {}", page.display()))?;
    let rendered = render_page(&text, resolver, config.tab_length)?;

    match &config.output_dir {
        Some(dir) => {
            let name = page
                .file_name()
                .ok_or_else(|| anyhow!("Page path {} has no file name", page.display()))?;
            let target = dir.join(name);
            fs::write(&target, rendered)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            tracing::info!(page = %page.display(), output = %target.display(), "rendered page");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write rendered page")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use find_snippet_files::StaticFileList;
    use snippet_resolver::RepositoryRegistry;
    use tempfile::tempdir;

    #[test]
    fn test_render_page_runs_both_adapters() {
        let repo = tempdir().unwrap();
        let source = repo.path().join("testing.go");
        fs::write(
            &source,
            "# code_snippet snippet-name start yaml\nsome: yaml\n# code_snippet snippet-name end\n",
        )
        .unwrap();
        let registry: RepositoryRegistry = [("repo-name", repo.path())].into_iter().collect();
        let resolver = SnippetResolver::new(registry, Box::new(StaticFileList::new([source])));

        let page = "inline: {% code_snippet 'repo-name', 'snippet-name' %}\n  --excerpt-- \"repo-name/snippet-name\"";
        let rendered = render_page(page, &resolver, 4).unwrap();
        assert_eq!(
            rendered,
            "inline: \n\n```yaml\nsome: yaml\n```\n\n\n  ```yaml\n  some: yaml\n  ```"
        );
    }
}
