//! Resolution of the working set of corpus-relative paths.

mod path;
mod walk;

pub use path::{corpus_relative, normalize_separators};
pub use walk::all_filesystem_paths;

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::git::{ChangedFiles, GitDiff};
use crate::{LintError, Result};

/// Where the paths to lint come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Files and directories named on the command line.
    Explicit(Vec<PathBuf>),
    /// Every file in the tree.
    All,
    /// A file listing one path per line.
    PathsFile(PathBuf),
    /// Files changed against `base`, widened to the whole tree when one of
    /// them matches a `force_full` trigger.
    Changed { base: String, force_full: Vec<String> },
}

impl PathSource {
    /// Resolve to ordered, de-duplicated paths relative to `root`.
    ///
    /// `root` must be canonical. Relative command-line paths are taken
    /// relative to the current directory.
    ///
    /// # Errors
    /// Returns an error if the paths file cannot be read, or in changed mode
    /// if the repository cannot be inspected.
    pub fn resolve(&self, root: &Path) -> Result<Vec<String>> {
        let paths = match self {
            Self::Explicit(args) => expand_args(root, args.iter().map(PathBuf::as_path)),
            Self::All => all_filesystem_paths(root, root),
            Self::PathsFile(file) => {
                let listing = fs::read_to_string(file).map_err(|source| LintError::FileRead {
                    path: file.clone(),
                    source,
                })?;
                let args: Vec<PathBuf> = listing
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(PathBuf::from)
                    .collect();
                expand_args(root, args.iter().map(PathBuf::as_path))
            }
            Self::Changed { base, force_full } => {
                let git = GitDiff::discover(root)?;
                let prefix = workdir_prefix(&git, root)?;
                let changed = changed_paths(&git, base, &prefix)?;
                if needs_full_scan(&changed, force_full) {
                    info!("lint configuration changed; linting the whole tree");
                    all_filesystem_paths(root, root)
                } else {
                    changed
                }
            }
        };
        let unique: IndexSet<String> = paths.into_iter().collect();
        debug!("resolved {} path(s)", unique.len());
        Ok(unique.into_iter().collect())
    }
}

/// Whether any changed path hits a trigger. A trigger ending in `/` matches
/// everything below that directory; any other trigger matches one path.
#[must_use]
pub fn needs_full_scan(changed: &[String], triggers: &[String]) -> bool {
    changed.iter().any(|path| {
        triggers.iter().any(|trigger| {
            if trigger.ends_with('/') {
                path.starts_with(trigger.as_str())
            } else {
                path == trigger
            }
        })
    })
}

/// Changed paths from `git` that lie under `prefix` (the corpus root's
/// position inside the work tree), re-expressed relative to the corpus root.
///
/// # Errors
/// Returns an error if the changed files cannot be determined.
pub fn changed_paths<C: ChangedFiles>(git: &C, base: &str, prefix: &str) -> Result<Vec<String>> {
    let changed = git.get_changed_files(base)?;
    Ok(changed
        .into_iter()
        .filter_map(|path| {
            if prefix.is_empty() {
                Some(path)
            } else {
                path.strip_prefix(prefix)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .map(str::to_string)
            }
        })
        .collect())
}

fn workdir_prefix(git: &GitDiff, root: &Path) -> Result<String> {
    let workdir = git.workdir().canonicalize()?;
    if workdir == root {
        return Ok(String::new());
    }
    corpus_relative(root, &workdir).ok_or_else(|| {
        LintError::Git(format!(
            "{} is not inside git work tree {}",
            root.display(),
            workdir.display()
        ))
    })
}

fn expand_args<'a>(root: &Path, args: impl Iterator<Item = &'a Path>) -> Vec<String> {
    let mut paths = Vec::new();
    for arg in args {
        let Some(target) = canonical_target(arg) else {
            warn!("skipping {}: no such file or directory", arg.display());
            continue;
        };
        if target.is_dir() {
            paths.extend(all_filesystem_paths(root, &target));
        } else if let Some(relative) = corpus_relative(&target, root) {
            paths.push(relative);
        } else {
            warn!("skipping {}: outside {}", arg.display(), root.display());
        }
    }
    paths
}

/// Canonicalize a directory, or a file's parent directory so that a
/// symlinked file keeps its own name.
fn canonical_target(arg: &Path) -> Option<PathBuf> {
    let meta = fs::symlink_metadata(arg).ok()?;
    if meta.is_dir() {
        return arg.canonicalize().ok();
    }
    let name = arg.file_name()?;
    let parent = match arg.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.canonicalize().ok()?,
        _ => std::env::current_dir().ok()?.canonicalize().ok()?,
    };
    Some(parent.join(name))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
