use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checks::Registry;
use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader};
use crate::error::{LintError, Result};
use crate::ignorelist::Ignorelist;
use crate::output::{GithubChecksOutput, Reporter};
use crate::runner::{LintOptions, lint};
use crate::{EXIT_CONFIG_ERROR, EXIT_LINT_ERRORS, EXIT_SUCCESS};

#[must_use]
pub fn run_lint(cli: &Cli) -> i32 {
    let stdout = io::stdout();
    let out = Box::new(BufWriter::new(stdout.lock()));
    match run_lint_impl(cli, out) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            debug!("{} failure: {e:?}", e.error_type());
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Lint according to `cli`, writing the report to `out`.
///
/// # Errors
/// Returns an error if the configuration or ignorelist is invalid, if the
/// paths cannot be resolved, or if the worker pool cannot be started.
pub fn run_lint_impl(cli: &Cli, out: Box<dyn Write + '_>) -> Result<i32> {
    // 1. Locate the corpus and load configuration
    let root = resolve_root(cli.repo_root.as_deref())?;
    let config = load_config(&root, cli.config.as_deref(), cli.no_config)?;

    // 2. Ignorelist plus every extra skip glob
    let (ignorelist, mut skip) = Ignorelist::load(&root.join(&config.ignore_file))?;
    skip.extend(&config.ignore_globs)?;
    skip.extend(&cli.ignore_glob)?;
    debug!(
        "{} ignorelist rule(s), {} skip glob(s)",
        ignorelist.len(),
        skip.len()
    );

    // 3. Working set of paths
    let paths = cli.path_source(&config).resolve(&root)?;

    // 4. Run checks
    let github = cli
        .github_checks_text_file
        .as_deref()
        .map(GithubChecksOutput::create)
        .transpose()?;
    let mut reporter = Reporter::new(&ignorelist, cli.output_format(), out)
        .with_github_checks(github)
        .with_ignore_file(config.ignore_file.clone());
    let registry = Registry::builtin();
    let options = LintOptions::from_config(&config.parallel, cli.jobs, cli.quiet);
    lint(&root, &paths, &registry, &skip, &options, &mut reporter)?;

    let tally = reporter.finish()?;
    Ok(exit_code(tally.total()))
}

/// Any surviving error fails the run; the count itself is not the status.
#[must_use]
pub const fn exit_code(total_errors: usize) -> i32 {
    if total_errors == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_LINT_ERRORS
    }
}

/// Canonical corpus root: `--repo-root` or the current directory.
///
/// # Errors
/// Returns an error if the directory does not exist.
pub fn resolve_root(repo_root: Option<&Path>) -> Result<PathBuf> {
    let root = match repo_root {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let canonical = root.canonicalize().map_err(|source| LintError::FileRead {
        path: root.clone(),
        source,
    })?;
    if !canonical.is_dir() {
        return Err(LintError::Config(format!(
            "repository root {} is not a directory",
            root.display()
        )));
    }
    Ok(canonical)
}

/// Config precedence: `--no-config` gives defaults, `--config` must exist,
/// otherwise an optional `corpus-lint.toml` in the root.
///
/// # Errors
/// Returns an error if the selected file cannot be read or is invalid.
pub fn load_config(root: &Path, explicit: Option<&Path>, no_config: bool) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    let loader = FileConfigLoader::new(root);
    match explicit {
        Some(path) => loader.load_from_path(path),
        None => loader.load(),
    }
}

#[cfg(test)]
#[path = "lint_tests.rs"]
mod tests;
