//! Checks over a path's name. None of these open the file.

use std::fs;
use std::path::Path;

use crate::rules::{
    AHEM_COPY, FILE_TYPE, GITIGNORE_FILE, MOJOM_JS, PATH_LENGTH, TENTATIVE_DIRECTORY_NAME,
    WORKER_COLLISION,
};
use crate::violation::Violation;

/// Longest path allowed, counting the leading `/` of the served URL.
pub const MAX_PATH_LENGTH: usize = 150;

/// Suffixes that collide with the test files generated from `.any.js` and
/// `.worker.js` sources.
const WORKER_ENDINGS: [(&str, &str); 3] = [
    (".any.html", ".any.js"),
    (".any.worker.html", ".any.js"),
    (".worker.html", ".worker.js"),
];

#[must_use]
pub fn check_path_length(_root: &Path, path: &str) -> Vec<Violation> {
    let length = path.chars().count() + 1;
    if length > MAX_PATH_LENGTH {
        return vec![PATH_LENGTH.error_with(path, &[path, &length.to_string()])];
    }
    Vec::new()
}

#[must_use]
pub fn check_file_type(root: &Path, path: &str) -> Vec<Violation> {
    let is_symlink = fs::symlink_metadata(root.join(path))
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if is_symlink {
        return vec![FILE_TYPE.error_with(path, &[path, "symlink"])];
    }
    Vec::new()
}

#[must_use]
pub fn check_worker_collision(_root: &Path, path: &str) -> Vec<Violation> {
    for (ending, generated) in WORKER_ENDINGS {
        if path.ends_with(ending) {
            return vec![WORKER_COLLISION.error_with(path, &[ending, generated])];
        }
    }
    Vec::new()
}

/// Nested `.gitignore` files are only allowed under a few tooling trees.
#[must_use]
pub fn check_gitignore_file(_root: &Path, path: &str) -> Vec<Violation> {
    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() == 1 || parts.last() != Some(&".gitignore") {
        return Vec::new();
    }
    if matches!(parts[0], "tools" | "docs") || parts[..2] == ["resources", "webidl2"] {
        return Vec::new();
    }
    vec![GITIGNORE_FILE.error(path)]
}

#[must_use]
pub fn check_mojom_js(_root: &Path, path: &str) -> Vec<Violation> {
    if path.ends_with(".mojom.js") {
        return vec![MOJOM_JS.error(path)];
    }
    Vec::new()
}

#[must_use]
pub fn check_ahem_copy(_root: &Path, path: &str) -> Vec<Violation> {
    let lower = path.to_lowercase();
    if lower.contains("ahem") && lower.ends_with(".ttf") {
        return vec![AHEM_COPY.error(path)];
    }
    Vec::new()
}

#[must_use]
pub fn check_tentative_directories(_root: &Path, path: &str) -> Vec<Violation> {
    let mut dirs = path.split('/').rev().skip(1);
    if dirs.any(|dir| dir.contains("tentative") && dir != "tentative") {
        return vec![TENTATIVE_DIRECTORY_NAME.error(path)];
    }
    Vec::new()
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
