// crates/snippet_resolver/src/lib.rs

//! Resolves `(repository alias, snippet name)` references to formatted
//! fenced code blocks.
//!
//! A [`SnippetResolver`] is built once per documentation build. The first
//! reference to a repository runs the file search and the parser over the
//! whole repository; every later reference to that repository is a map
//! lookup. Nothing is re-scanned until the resolver is [reset] or dropped.
//!
//! [reset]: SnippetResolver::reset

use std::path::Path;

use extract_snippets::{parse_snippet_file, MarkerStrip};
use find_snippet_files::{locate_snippet_files, FileSearch};

mod cache;
mod error;
mod format;
mod registry;

pub use cache::{SnippetCache, SnippetMap};
pub use error::SnippetError;
pub use extract_snippets::Snippet;
pub use format::{fenced_lines, format_snippet, inline_block, FormatMode};
pub use registry::RepositoryRegistry;

pub struct SnippetResolver {
    registry: RepositoryRegistry,
    search: Box<dyn FileSearch>,
    strip: MarkerStrip,
    cache: SnippetCache,
}

impl SnippetResolver {
    pub fn new(registry: RepositoryRegistry, search: Box<dyn FileSearch>) -> Self {
        let cache = SnippetCache::for_aliases(registry.aliases());
        Self {
            registry,
            search,
            strip: MarkerStrip::default(),
            cache,
        }
    }

    pub fn with_marker_strip(mut self, strip: MarkerStrip) -> Self {
        self.strip = strip;
        self
    }

    pub fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    /// Looks up the parsed record for `name` in repository `repo`.
    pub fn snippet(&self, repo: &str, name: &str) -> Result<&Snippet, SnippetError> {
        self.snippets_for(repo)?
            .get(name)
            .ok_or_else(|| SnippetError::unknown_snippet(repo, name))
    }

    /// Looks up `name` in repository `repo` and renders it per `mode`.
    pub fn resolve(&self, repo: &str, name: &str, mode: &FormatMode) -> Result<String, SnippetError> {
        let snippet = self.snippet(repo, name)?;
        tracing::debug!(repo, name, syntax = %snippet.syntax, "resolved code snippet");
        Ok(format_snippet(snippet, mode))
    }

    /// Whether `repo` has already been scanned in this build.
    pub fn is_populated(&self, repo: &str) -> bool {
        self.cache.is_populated(repo)
    }

    /// Drops every cached repository so the next reference scans again.
    pub fn reset(&mut self) {
        self.cache = SnippetCache::for_aliases(self.registry.aliases());
    }

    fn snippets_for(&self, repo: &str) -> Result<&SnippetMap, SnippetError> {
        let unknown = || SnippetError::UnknownRepository(repo.to_string());
        let root = self.registry.root(repo).ok_or_else(unknown)?;
        self.cache
            .get_or_populate(repo, || self.scan_repository(repo, root))
            .ok_or_else(unknown)
    }

    fn scan_repository(&self, repo: &str, root: &Path) -> SnippetMap {
        let files = locate_snippet_files(self.search.as_ref(), root);
        let mut snippets = SnippetMap::new();

        for path in &files {
            let found = match parse_snippet_file(path, self.strip) {
                Ok(found) => found,
                Err(err) => {
                    tracing::warn!(repo, path = %path.display(), error = %err, "skipping unreadable file");
                    continue;
                }
            };
            for snippet in found {
                let name = snippet.name.clone();
                if snippets.insert(name.clone(), snippet).is_some() {
                    tracing::debug!(repo, name = %name, path = %path.display(), "snippet redefined; keeping the later one");
                }
            }
        }

        tracing::info!(
            repo,
            root = %root.display(),
            files = files.len(),
            snippets = snippets.len(),
            "populated snippet cache"
        );
        snippets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use find_snippet_files::StaticFileList;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_resolver_is_shareable_across_threads() {
        assert_send_sync::<SnippetResolver>();
    }

    #[test]
    fn test_unknown_repository_is_reported_before_any_search() {
        let resolver = SnippetResolver::new(
            RepositoryRegistry::new(),
            Box::new(StaticFileList::default()),
        );
        let err = resolver.snippet("missing", "greet").unwrap_err();
        assert_eq!(err, SnippetError::UnknownRepository("missing".to_string()));
        assert!(err.to_string().contains("\"missing\""));
    }
}
