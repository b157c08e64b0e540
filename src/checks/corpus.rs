//! Checks that need the whole filtered path list at once.

use std::path::Path;

use indexmap::IndexMap;
use tracing::warn;

use crate::checks::content::extension;
use crate::git;
use crate::rules::{DUPLICATE_BASENAME_PATH, DUPLICATE_CASE_INSENSITIVE_PATH, IGNORED_PATH};
use crate::violation::Violation;

const TESTHARNESS_EXTENSIONS: &[&str] = &[".html", ".htm", ".xht", ".xhtml", ".svg"];
const SCRIPT_TEST_SUFFIXES: &[&str] = &[".any.js", ".window.js", ".worker.js"];
const SUPPORT_DIRS: &[&str] = &["resources", "support", "tools", "common", "reference"];

/// Whether a path could hold a testharness test, judging by its name alone.
///
/// Files in support directories and reftest references never do.
#[must_use]
pub fn is_possible_testharness(path: &str) -> bool {
    let mut parts = path.rsplit('/');
    let name = parts.next().unwrap_or(path);
    if parts.any(|dir| SUPPORT_DIRS.contains(&dir)) {
        return false;
    }
    if name.starts_with('.') {
        return false;
    }
    let stem = name.strip_suffix(extension(name)).unwrap_or(name);
    if stem.ends_with("-ref") || stem.ends_with("-notref") {
        return false;
    }
    TESTHARNESS_EXTENSIONS.contains(&extension(name))
        || SCRIPT_TEST_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Every testharness file must have a unique path once its extension is
/// removed: `a/b.html` and `a/b.xhtml` collide, `a/b.html` and `c/b.html` do
/// not.
#[must_use]
pub fn check_unique_testharness_basenames(_root: &Path, paths: &[String]) -> Vec<Violation> {
    let mut groups: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for path in paths.iter().filter(|p| is_possible_testharness(p)) {
        let ext = extension(path);
        let base = &path[..path.len() - ext.len()];
        groups.entry(base).or_default().push(ext);
    }

    let mut errors = Vec::new();
    for (base, exts) in groups.iter().filter(|(_, exts)| exts.len() > 1) {
        let context = exts.join(", ");
        for ext in exts {
            errors.push(DUPLICATE_BASENAME_PATH.error_with(&format!("{base}{ext}"), &[&context]));
        }
    }
    errors
}

/// Paths that differ only in case break checkouts on case-insensitive
/// filesystems. Later paths are reported against the first one seen.
#[must_use]
pub fn check_unique_case_insensitive_paths(_root: &Path, paths: &[String]) -> Vec<Violation> {
    let mut seen: IndexMap<String, &str> = IndexMap::new();
    let mut errors = Vec::new();
    for path in paths {
        let lower = path.to_lowercase();
        if let Some(first) = seen.get(&lower) {
            errors.push(DUPLICATE_CASE_INSENSITIVE_PATH.error_with(path, &[*first]));
        } else {
            seen.insert(lower, path);
        }
    }
    errors
}

/// Paths that `.gitignore` rules would hide must carry an explicit `!`
/// exception.
#[must_use]
pub fn check_git_ignore(root: &Path, paths: &[String]) -> Vec<Violation> {
    match git::check_ignore(root, paths) {
        Ok(matches) => matches
            .into_iter()
            .filter(|m| !m.is_negated())
            .map(|m| IGNORED_PATH.error_with(&m.path, &[&m.path]))
            .collect(),
        Err(e) => {
            warn!("skipping .gitignore cross-check: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "corpus_tests.rs"]
mod tests;
