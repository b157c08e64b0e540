use std::fmt::Write;

use crate::error::Result;
use crate::violation::Violation;

use super::OutputFormatter;

const HEADING: &str = "Got lint errors:

| Error Type | Position | Message |
|------------|----------|---------|
";

/// Markdown table rows, preceded by the table heading on the first batch.
pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format(&self, errors: &[Violation], first: bool) -> Result<String> {
        let mut output = String::new();
        if errors.is_empty() {
            return Ok(output);
        }
        if first {
            output.push_str(HEADING);
        }
        for error in errors {
            writeln!(
                output,
                "{} | {} | {} |",
                error.rule,
                error.position(),
                error.message
            )
            .ok();
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
