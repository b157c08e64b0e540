use std::path::Path;

use ignore::WalkBuilder;

use super::path::corpus_relative;

/// Every file below `dir`, as paths relative to `root`, honouring
/// `.gitignore` files and always skipping `.git/`.
///
/// `root` and `dir` must be in the same form (typically both canonical).
/// Output is sorted by path so runs are reproducible.
#[must_use]
pub fn all_filesystem_paths(root: &Path, dir: &Path) -> Vec<String> {
    let mut paths: Vec<String> = WalkBuilder::new(dir)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .hidden(false)
        .parents(true)
        .filter_entry(|e| e.file_name() != ".git")
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_some_and(|ft| !ft.is_dir()))
        .filter_map(|e| corpus_relative(e.path(), root))
        .collect();
    paths.sort();
    paths
}
