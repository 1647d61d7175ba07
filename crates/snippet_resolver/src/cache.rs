// crates/snippet_resolver/src/cache.rs

use std::collections::HashMap;

use extract_snippets::Snippet;
use once_cell::sync::OnceCell;

/// Snippets of one repository, keyed by name.
pub type SnippetMap = HashMap<String, Snippet>;

/// Per-repository snippet maps for the lifetime of one build.
///
/// Each slot is filled at most once. Concurrent first lookups of the same
/// alias run the populating closure once; the other callers block until it
/// finishes and then read the same map.
#[derive(Debug, Default)]
pub struct SnippetCache {
    repos: HashMap<String, OnceCell<SnippetMap>>,
}

impl SnippetCache {
    /// Creates an empty slot for every alias.
    pub fn for_aliases<'a, I>(aliases: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            repos: aliases
                .into_iter()
                .map(|alias| (alias.to_string(), OnceCell::new()))
                .collect(),
        }
    }

    /// Returns the map for `alias`, running `populate` if this is the first
    /// lookup. `None` when the alias has no slot.
    pub fn get_or_populate<F>(&self, alias: &str, populate: F) -> Option<&SnippetMap>
    where
        F: FnOnce() -> SnippetMap,
    {
        self.repos.get(alias).map(|slot| slot.get_or_init(populate))
    }

    /// The map for `alias` if it has already been populated.
    pub fn get(&self, alias: &str) -> Option<&SnippetMap> {
        self.repos.get(alias).and_then(OnceCell::get)
    }

    pub fn is_populated(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }
}
