use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::source::PathSource;

#[derive(Parser, Debug)]
#[command(name = "corpus-lint")]
#[command(author, version, about = "Lint a file-based test corpus against its rule catalog")]
#[command(long_about = "Runs path, content and whole-corpus checks over a test corpus, \
    suppressing known violations listed in the ignore file.\n\n\
    Without paths, only files changed against the configured base revision are linted.\n\n\
    Exit codes:\n  \
    0 - No lint errors\n  \
    1 - Lint errors found\n  \
    2 - Configuration or runtime error")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Files or directories to lint
    pub paths: Vec<PathBuf>,

    /// Output machine-readable JSON, one object per line
    #[arg(long, conflicts_with = "markdown")]
    pub json: bool,

    /// Output a markdown table
    #[arg(long)]
    pub markdown: bool,

    /// Root of the corpus (defaults to the current directory)
    #[arg(long)]
    pub repo_root: Option<PathBuf>,

    /// Additional glob of paths to skip (can be specified multiple times)
    #[arg(long, value_name = "GLOB")]
    pub ignore_glob: Vec<String>,

    /// Without paths, lint the whole tree instead of changed files
    #[arg(long)]
    pub all: bool,

    /// Also write errors to this file for CI check annotations
    #[arg(long, value_name = "FILE")]
    pub github_checks_text_file: Option<PathBuf>,

    /// Worker threads for content checks (0 = one per CPU)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// File listing the paths to lint, one per line
    #[arg(long, value_name = "FILE")]
    pub paths_file: Option<PathBuf>,

    /// Revision changed files are computed against (overrides config)
    #[arg(long, value_name = "REV")]
    pub base: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.markdown {
            OutputFormat::Markdown
        } else {
            OutputFormat::Text
        }
    }

    /// Explicit paths win, then `--all`, then `--paths-file`; otherwise the
    /// changed files are linted.
    #[must_use]
    pub fn path_source(&self, config: &Config) -> PathSource {
        if !self.paths.is_empty() {
            PathSource::Explicit(self.paths.clone())
        } else if self.all {
            PathSource::All
        } else if let Some(file) = &self.paths_file {
            PathSource::PathsFile(file.clone())
        } else {
            PathSource::Changed {
                base: self
                    .base
                    .clone()
                    .unwrap_or_else(|| config.changed.base.clone()),
                force_full: config.changed.force_full.clone(),
            }
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
