use std::fmt::Write;

use crate::error::Result;
use crate::violation::Violation;

use super::OutputFormatter;

/// `path[:line]: message (RULE)`, one violation per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Render one violation without a trailing newline.
    #[must_use]
    pub fn format_line(error: &Violation) -> String {
        error.to_string()
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, errors: &[Violation], _first: bool) -> Result<String> {
        let mut output = String::new();
        for error in errors {
            writeln!(output, "{}", Self::format_line(error)).ok();
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
