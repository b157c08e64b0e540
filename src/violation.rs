use std::fmt;

use serde::Serialize;

/// A single rule violation reported against a corpus-relative path.
///
/// `line` is 1-based when present; path-only and corpus-wide rules leave it
/// unset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    pub rule: String,
    pub message: String,
    pub path: String,
    pub line: Option<usize>,
}

impl Violation {
    #[must_use]
    pub fn new(rule: impl Into<String>, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
            path: path.into(),
            line: None,
        }
    }

    #[must_use]
    pub const fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// `path` or `path:line`, as shown in every renderer.
    #[must_use]
    pub fn position(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.path),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.position(), self.message, self.rule)
    }
}
