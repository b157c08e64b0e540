use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::violation::Violation;

use super::OutputFormatter;

/// Newline-delimited JSON, one object per violation.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonRecord<'a> {
    path: &'a str,
    lineno: Option<usize>,
    rule: &'a str,
    message: &'a str,
}

impl<'a> From<&'a Violation> for JsonRecord<'a> {
    fn from(error: &'a Violation) -> Self {
        Self {
            path: &error.path,
            lineno: error.line,
            rule: &error.rule,
            message: &error.message,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, errors: &[Violation], _first: bool) -> Result<String> {
        let mut output = String::new();
        for error in errors {
            let line = serde_json::to_string(&JsonRecord::from(error))?;
            writeln!(output, "{line}").ok();
        }
        Ok(output)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
