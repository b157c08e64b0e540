//! Text file consumed by CI to annotate pull requests.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::violation::Violation;

use super::TextFormatter;

const PREAMBLE: &str = "
Changes in this PR contain lint errors, listed below. These errors must either be fixed or added to the list of ignored errors; see [the documentation](https://web-platform-tests.org/writing-tests/lint-tool.html). For help, please tag `@web-platform-tests/wpt-core-team` in a comment.
";

const FENCE: &str = "```";

/// Appends plain-text violations inside a fenced block, opening it with a
/// preamble on first use.
pub struct GithubChecksOutput {
    out: Box<dyn Write>,
    opened: bool,
}

impl GithubChecksOutput {
    #[must_use]
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out, opened: false }
    }

    /// Create (or truncate) the file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_errors(&mut self, errors: &[Violation]) -> Result<()> {
        if errors.is_empty() {
            return Ok(());
        }
        if !self.opened {
            writeln!(self.out, "{PREAMBLE}")?;
            writeln!(self.out, "{FENCE}")?;
            self.opened = true;
        }
        for error in errors {
            writeln!(self.out, "{}", TextFormatter::format_line(error))?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Close the fenced block if anything was written, then flush.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn finish(&mut self) -> Result<()> {
        if self.opened {
            writeln!(self.out, "{FENCE}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
