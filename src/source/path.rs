//! Conversions between filesystem paths and corpus-relative `/` paths.

use std::path::Path;

/// Normalize path separators to forward slashes.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Express `path` relative to `root` with forward slashes.
///
/// Both paths must already be in the same form (both canonical, or both as
/// produced by one directory walk). Returns `None` for paths outside `root`
/// and for `root` itself.
#[must_use]
pub fn corpus_relative(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let result = normalize_separators(&relative.to_string_lossy());
    (!result.is_empty()).then_some(result)
}
