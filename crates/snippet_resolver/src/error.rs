// crates/snippet_resolver/src/error.rs

use thiserror::Error;

/// Resolution failures. Both are fatal for the page that made the reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnippetError {
    #[error("dependent section \"{0}\" not defined in configuration")]
    UnknownRepository(String),

    #[error(
        "could not find code snippet \"{name}\" under repo \"{repo}\" -- please check for \"rg\" or entry in \".gitignore\""
    )]
    UnknownSnippet { repo: String, name: String },
}

impl SnippetError {
    pub fn unknown_snippet(repo: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownSnippet {
            repo: repo.into(),
            name: name.into(),
        }
    }
}
