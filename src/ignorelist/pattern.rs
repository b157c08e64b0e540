use globset::{GlobBuilder, GlobMatcher};

use crate::error::{LintError, Result};

/// Normalize case and separators the way the host filesystem compares paths.
///
/// Windows paths compare case-insensitively with either separator, so both
/// sides of every match are lowered and use `/`. Elsewhere paths are compared
/// verbatim.
#[must_use]
pub fn normcase(path: &str) -> String {
    if cfg!(windows) {
        path.replace('\\', "/").to_lowercase()
    } else {
        path.to_string()
    }
}

/// A shell-style glob matched against whole corpus-relative paths.
///
/// `*` crosses directory separators and backslashes are literal, so a pattern
/// such as `css/*` covers every file below `css/`.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    pattern: String,
    matcher: GlobMatcher,
}

impl GlobPattern {
    /// Compile a pattern after case-normalizing it.
    ///
    /// # Errors
    /// Returns an error if the pattern is not a valid glob.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = normcase(pattern);
        let glob = GlobBuilder::new(&pattern)
            .literal_separator(false)
            .backslash_escape(false)
            .build()
            .map_err(|source| LintError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
        Ok(Self {
            matcher: glob.compile_matcher(),
            pattern,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Match a path that the caller has already passed through [`normcase`].
    #[must_use]
    pub fn is_match_normalized(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.is_match_normalized(&normcase(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_crosses_directories() {
        let p = GlobPattern::new("a/*").unwrap();
        assert!(p.is_match("a/b.html"));
        assert!(p.is_match("a/deep/nested/c.js"));
        assert!(!p.is_match("b/a/c.js"));
    }

    #[test]
    fn exact_path_matches_only_itself() {
        let p = GlobPattern::new("x/y.js").unwrap();
        assert!(p.is_match("x/y.js"));
        assert!(!p.is_match("x/y.jsx"));
    }

    #[test]
    fn question_mark_and_classes() {
        let p = GlobPattern::new("t?st/[!a]*.html").unwrap();
        assert!(p.is_match("test/b.html"));
        assert!(!p.is_match("test/a.html"));
    }

    #[test]
    fn invalid_pattern_is_error() {
        assert!(GlobPattern::new("[").is_err());
    }

    #[cfg(not(windows))]
    #[test]
    fn matching_is_case_sensitive_on_unix() {
        let p = GlobPattern::new("A/*").unwrap();
        assert_eq!(p.as_str(), "A/*");
        assert!(!p.is_match("a/b"));
    }
}
