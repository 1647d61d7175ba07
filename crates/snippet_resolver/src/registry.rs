// crates/snippet_resolver/src/registry.rs

use std::collections::BTreeMap;
use std::path::{self, Path, PathBuf};

/// Repository aliases and the filesystem roots they stand for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryRegistry {
    roots: BTreeMap<String, PathBuf>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `alias` to `root`, returning the root it was previously bound to.
    /// A relative root is resolved against the current directory now.
    pub fn register(&mut self, alias: impl Into<String>, root: impl Into<PathBuf>) -> Option<PathBuf> {
        let root = root.into();
        let root = if root.as_os_str().is_empty() {
            root
        } else {
            path::absolute(&root).unwrap_or(root)
        };
        self.roots.insert(alias.into(), root)
    }

    /// Root for `alias`. An alias bound to an empty path counts as undefined.
    pub fn root(&self, alias: &str) -> Option<&Path> {
        self.roots
            .get(alias)
            .map(PathBuf::as_path)
            .filter(|root| !root.as_os_str().is_empty())
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RepositoryRegistry
where
    K: Into<String>,
    V: Into<PathBuf>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (alias, root) in iter {
            registry.register(alias, root);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = RepositoryRegistry::new();
        assert!(registry.register("docs", "/src/docs").is_none());
        assert_eq!(registry.root("docs"), Some(Path::new("/src/docs")));
        assert_eq!(registry.root("other"), None);
    }

    #[test]
    fn test_reregister_returns_previous_root() {
        let mut registry: RepositoryRegistry = [("docs", "/a")].into_iter().collect();
        assert_eq!(registry.register("docs", "/b"), Some(PathBuf::from("/a")));
        assert_eq!(registry.root("docs"), Some(Path::new("/b")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let registry: RepositoryRegistry = [("docs", "some/repo")].into_iter().collect();
        let root = registry.root("docs").unwrap();
        assert!(root.is_absolute());
        assert_eq!(root, std::env::current_dir().unwrap().join("some/repo"));
    }

    #[test]
    fn test_empty_root_is_undefined() {
        let registry: RepositoryRegistry = [("blank", "")].into_iter().collect();
        assert_eq!(registry.root("blank"), None);
    }
}
