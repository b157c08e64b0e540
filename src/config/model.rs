use serde::{Deserialize, Serialize};

/// Default ignorelist file name, relative to the repository root.
pub const DEFAULT_IGNORE_FILE: &str = "lint.ignore";

/// Content targets needed before the worker pool is used.
pub const DEFAULT_MIN_FILES_FOR_PARALLEL: usize = 80;

/// Files handed to a worker per dispatch.
pub const DEFAULT_CHUNK_SIZE: usize = 40;

/// Top-level `corpus-lint.toml` contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Ignorelist path relative to the repository root.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Globs excluded from every check, in addition to `*` ignorelist
    /// entries and `--ignore-glob`.
    #[serde(default)]
    pub ignore_globs: Vec<String>,

    #[serde(default)]
    pub parallel: ParallelConfig,

    #[serde(default)]
    pub changed: ChangedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            ignore_globs: Vec::new(),
            parallel: ParallelConfig::default(),
            changed: ChangedConfig::default(),
        }
    }
}

/// `[parallel]` scheduler tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParallelConfig {
    #[serde(default = "default_min_files")]
    pub min_files: usize,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_files: DEFAULT_MIN_FILES_FOR_PARALLEL,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// `[changed]` settings for linting only changed files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ChangedConfig {
    /// Revision whose diff against HEAD counts as changed.
    #[serde(default = "default_base")]
    pub base: String,

    /// Changed paths that widen the run to the whole tree. A trailing `/`
    /// covers a directory.
    #[serde(default = "default_force_full")]
    pub force_full: Vec<String>,
}

impl Default for ChangedConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            force_full: default_force_full(),
        }
    }
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

const fn default_min_files() -> usize {
    DEFAULT_MIN_FILES_FOR_PARALLEL
}

const fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_base() -> String {
    "HEAD".to_string()
}

fn default_force_full() -> Vec<String> {
    vec![DEFAULT_IGNORE_FILE.to_string(), "tools/lint/".to_string()]
}
