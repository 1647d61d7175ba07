// crates/render_snippets/src/config.rs

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use excerpt_preprocessor::DEFAULT_TAB_LENGTH;
use extract_snippets::MarkerStrip;
use serde::Deserialize;
use snippet_resolver::RepositoryRegistry;

use crate::cli::Cli;

/// Environment override for the search program, e.g. `SNIPPET_RG=/opt/bin/rg`.
pub const SEARCH_PROGRAM_ENV: &str = "SNIPPET_RG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    /// External `rg` process.
    #[default]
    Ripgrep,
    /// In-process directory walk.
    Walk,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub backend: SearchBackend,
    pub program: String,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            backend: SearchBackend::default(),
            program: "rg".to_string(),
        }
    }
}

/// On-disk configuration file.
///
/// ```yaml
/// dependent_sections:
///   repo-name: ../some/repo
/// tab_length: 4
/// strip_nested_markers: false
/// search:
///   backend: ripgrep
///   program: rg
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(alias = "sections")]
    pub dependent_sections: BTreeMap<String, PathBuf>,
    pub tab_length: usize,
    pub strip_nested_markers: bool,
    pub search: SearchSection,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            dependent_sections: BTreeMap::new(),
            tab_length: DEFAULT_TAB_LENGTH,
            strip_nested_markers: false,
            search: SearchSection::default(),
        }
    }
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("Failed to parse snippet configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Runtime configuration composed from the config file, the environment and
/// the command line, in increasing order of precedence.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub repositories: RepositoryRegistry,
    pub tab_length: usize,
    pub marker_strip: MarkerStrip,
    pub search: SearchBackend,
    pub search_program: String,
    pub pages: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to get current directory")?;
        let (file, file_dir) = match &cli.config {
            Some(path) => {
                let path = cwd.join(path);
                let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                (FileConfig::load(&path)?, dir)
            }
            None => (FileConfig::default(), cwd.clone()),
        };
        Ok(Self::compose(file, &file_dir, env::var(SEARCH_PROGRAM_ENV).ok(), cli, &cwd))
    }

    /// Merges the layers. Relative repository roots from the file are
    /// resolved against `file_dir`, those from the command line against `cwd`.
    pub fn compose(file: FileConfig, file_dir: &Path, env_program: Option<String>, cli: &Cli, cwd: &Path) -> Self {
        let mut repositories = RepositoryRegistry::new();
        for (alias, root) in &file.dependent_sections {
            repositories.register(alias.clone(), absolutize(file_dir, root));
        }
        for (alias, root) in &cli.repos {
            repositories.register(alias.clone(), absolutize(cwd, root));
        }

        let search_program = cli
            .rg
            .clone()
            .or(env_program)
            .unwrap_or(file.search.program);

        let marker_strip = if cli.strip_nested_markers || file.strip_nested_markers {
            MarkerStrip::All
        } else {
            MarkerStrip::First
        };

        Self {
            repositories,
            tab_length: cli.tab_length.unwrap_or(file.tab_length),
            marker_strip,
            search: cli.search.unwrap_or(file.search.backend),
            search_program,
            pages: cli.pages.clone(),
            output_dir: cli.output_dir.clone(),
            verbose: cli.verbose,
        }
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        // Left empty so the alias stays undefined.
        PathBuf::new()
    } else {
        base.join(path)
    }
}
