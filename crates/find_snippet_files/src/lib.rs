// crates/find_snippet_files/src/lib.rs

//! Locates the files of a repository that contain at least one snippet start
//! marker.
//!
//! The actual search is behind the [`FileSearch`] trait so the resolver can be
//! driven by `rg` in production, by a plain directory walk where `rg` is not
//! installed, or by an explicit file list in tests.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use snippet_marker::{SEARCH_PATTERN, SEARCH_RE};
use thiserror::Error;
use walkdir::WalkDir;

/// Failures reported by a search provider. The locator never propagates these;
/// see [`locate_snippet_files`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search program {program:?} could not be started: {source}")]
    Unavailable {
        program: OsString,
        #[source]
        source: io::Error,
    },

    #[error("search program {program:?} failed ({status}): {stderr}")]
    Failed {
        program: OsString,
        status: String,
        stderr: String,
    },
}

/// A provider that lists candidate files under a repository root.
///
/// Returned paths may be absolute or relative to `root`.
pub trait FileSearch: Send + Sync {
    fn candidate_files(&self, root: &Path) -> Result<Vec<PathBuf>, SearchError>;
}

/// Production provider: shells out to ripgrep.
///
/// Invoked as `rg -m 1 -l '<start pattern>' <root>`. Exit status 1 with no
/// output means "no matches" and is not an error.
#[derive(Debug, Clone)]
pub struct RipgrepSearch {
    program: OsString,
}

impl RipgrepSearch {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for RipgrepSearch {
    fn default() -> Self {
        Self::new("rg")
    }
}

impl FileSearch for RipgrepSearch {
    fn candidate_files(&self, root: &Path) -> Result<Vec<PathBuf>, SearchError> {
        tracing::debug!(program = ?self.program, root = %root.display(), "running file search");
        let output = Command::new(&self.program)
            .args(["-m", "1", "-l", SEARCH_PATTERN])
            .arg(root)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SearchError::Unavailable {
                program: self.program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(0) => {}
            Some(1) if output.stdout.is_empty() => return Ok(Vec::new()),
            _ => {
                return Err(SearchError::Failed {
                    program: self.program.clone(),
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                })
            }
        }

        let mut files: Vec<PathBuf> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        // rg reports files in whatever order its workers finish.
        files.sort();
        Ok(files)
    }
}

/// Files larger than this are skipped by [`WalkDirSearch`] unless overridden.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// In-process provider: walks the tree with `walkdir` and applies the same
/// start pattern. Skips `.git` directories, files that are not UTF-8 and files
/// over the size limit.
#[derive(Debug, Clone)]
pub struct WalkDirSearch {
    max_file_size: u64,
}

impl WalkDirSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

impl Default for WalkDirSearch {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl FileSearch for WalkDirSearch {
    fn candidate_files(&self, root: &Path) -> Result<Vec<PathBuf>, SearchError> {
        let files = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| match entry.metadata() {
                Ok(meta) if meta.len() <= self.max_file_size => true,
                Ok(meta) => {
                    tracing::debug!(path = %entry.path().display(), size = meta.len(), "skipping large file");
                    false
                }
                Err(_) => false,
            })
            .map(|entry| entry.into_path())
            .filter(|path| {
                fs::read_to_string(path)
                    .map(|content| SEARCH_RE.is_match(&content))
                    .unwrap_or(false)
            })
            .collect();
        Ok(files)
    }
}

/// Provider backed by an explicit list of files.
#[derive(Debug, Clone, Default)]
pub struct StaticFileList {
    files: Vec<PathBuf>,
}

impl StaticFileList {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileSearch for StaticFileList {
    fn candidate_files(&self, _root: &Path) -> Result<Vec<PathBuf>, SearchError> {
        Ok(self.files.clone())
    }
}

/// Runs `search` over `root` and returns openable paths.
///
/// Relative results are joined onto `root`. Any provider failure is logged and
/// treated as "no candidate files" so one broken repository cannot abort
/// unrelated pages.
pub fn locate_snippet_files(search: &dyn FileSearch, root: &Path) -> Vec<PathBuf> {
    match search.candidate_files(root) {
        Ok(files) => {
            let files: Vec<PathBuf> = files.into_iter().map(|path| root.join(path)).collect();
            tracing::debug!(root = %root.display(), count = files.len(), "located snippet files");
            files
        }
        Err(err) => {
            tracing::warn!(root = %root.display(), error = %err, "file search failed; treating as no files");
            Vec::new()
        }
    }
}
