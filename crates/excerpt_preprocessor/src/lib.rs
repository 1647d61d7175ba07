// crates/excerpt_preprocessor/src/lib.rs

//! The two ways documentation pages pull snippets in:
//!
//! * [`ExcerptPreprocessor`] replaces lines such as
//!   `  --excerpt-- "repo/name"` with an indented fenced block before the
//!   markdown is parsed.
//! * [`expand_template_tags`] replaces `{% code_snippet 'repo', 'name' %}`
//!   tags with an inline fenced block; [`code_snippet`] is the callback behind
//!   it.
//!
//! Both borrow the same [`SnippetResolver`](snippet_resolver::SnippetResolver),
//! so a repository is scanned once no matter which form references it.

use snippet_resolver::SnippetError;
use thiserror::Error;

mod preprocessor;
mod template;

pub use preprocessor::{expand_tabs, parse_reference, ExcerptPreprocessor, ExcerptReference, DEFAULT_TAB_LENGTH};
pub use template::{code_snippet, expand_template_tags};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExcerptError {
    #[error(transparent)]
    Snippet(#[from] SnippetError),

    #[error("malformed excerpt reference {reference:?}: expected \"<repo>/<name>\"")]
    MalformedReference { reference: String },

    #[error("malformed code_snippet tag {tag:?}: expected {{% code_snippet '<repo>', '<name>' %}}")]
    MalformedTag { tag: String },
}
