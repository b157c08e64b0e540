mod github;
mod json;
mod markdown;
mod progress;
mod reporter;
mod text;

pub use github::GithubChecksOutput;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use progress::LintProgress;
pub use reporter::{Reporter, RunTally, error_count_summary, ignore_hint};
pub use text::TextFormatter;

use crate::error::Result;
use crate::violation::Violation;

/// Trait for rendering a batch of surviving violations.
pub trait OutputFormatter {
    /// Format one batch. `first` is true only for the first non-empty batch
    /// of a run.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, errors: &[Violation], first: bool) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Whether the closing count summary and ignore hint are printed.
    #[must_use]
    pub const fn shows_summary(self) -> bool {
        matches!(self, Self::Text | Self::Markdown)
    }

    #[must_use]
    pub fn formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Markdown => Box::new(MarkdownFormatter),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
