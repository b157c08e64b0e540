//! Streams filtered violations to the chosen renderer and keeps the tally.

use std::io::Write;

use indexmap::IndexMap;

use crate::error::Result;
use crate::ignorelist::Ignorelist;
use crate::violation::Violation;

use super::{GithubChecksOutput, OutputFormat, OutputFormatter};

/// Per-rule counts for one run, in first-seen order, plus the last surviving
/// violation's rule and path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTally {
    counts: IndexMap<String, usize>,
    last: Option<(String, String)>,
}

impl RunTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a batch. Returns the last `(rule, path)` pair of the batch.
    pub fn add(&mut self, errors: &[Violation]) -> Option<(String, String)> {
        for error in errors {
            *self.counts.entry(error.rule.clone()).or_default() += 1;
        }
        let last = errors.last().map(|e| (e.rule.clone(), e.path.clone()));
        if last.is_some() {
            self.last.clone_from(&last);
        }
        last
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn count(&self, rule: &str) -> usize {
        self.counts.get(rule).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(rule, n)| (rule.as_str(), *n))
    }

    #[must_use]
    pub fn last(&self) -> Option<(&str, &str)> {
        self.last
            .as_ref()
            .map(|(rule, path)| (rule.as_str(), path.as_str()))
    }
}

/// Receives every raw batch of violations produced by a run.
///
/// Each batch is filtered through the ignorelist, rendered to the output
/// stream (and the CI annotation file when one is configured), then counted.
pub struct Reporter<'a> {
    ignorelist: &'a Ignorelist,
    format: OutputFormat,
    formatter: Box<dyn OutputFormatter>,
    out: Box<dyn Write + 'a>,
    github: Option<GithubChecksOutput>,
    ignore_file: String,
    tally: RunTally,
}

impl<'a> Reporter<'a> {
    #[must_use]
    pub fn new(
        ignorelist: &'a Ignorelist,
        format: OutputFormat,
        out: Box<dyn Write + 'a>,
    ) -> Self {
        Self {
            ignorelist,
            format,
            formatter: format.formatter(),
            out,
            github: None,
            ignore_file: crate::config::DEFAULT_IGNORE_FILE.to_string(),
            tally: RunTally::new(),
        }
    }

    #[must_use]
    pub fn with_github_checks(mut self, github: Option<GithubChecksOutput>) -> Self {
        self.github = github;
        self
    }

    /// Ignorelist file name quoted in the closing hint.
    #[must_use]
    pub fn with_ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    /// Filter, render and count one batch. Output is flushed before
    /// returning so it survives a later crash.
    ///
    /// Returns the last surviving `(rule, path)` pair, or `None` when the
    /// ignorelist suppressed everything.
    ///
    /// # Errors
    /// Returns an error if the output cannot be written.
    pub fn record(&mut self, errors: Vec<Violation>) -> Result<Option<(String, String)>> {
        let errors = self.ignorelist.filter(errors);
        if errors.is_empty() {
            return Ok(None);
        }

        let first = self.tally.is_empty();
        let rendered = self.formatter.format(&errors, first)?;
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()?;
        if let Some(github) = self.github.as_mut() {
            github.write_errors(&errors)?;
        }
        Ok(self.tally.add(&errors))
    }

    #[must_use]
    pub const fn tally(&self) -> &RunTally {
        &self.tally
    }

    /// Print the count summary and ignore hint (text and markdown only),
    /// close the CI annotation block, and return the tally.
    ///
    /// # Errors
    /// Returns an error if the output cannot be written.
    pub fn finish(mut self) -> Result<RunTally> {
        if self.format.shows_summary()
            && let Some(summary) = error_count_summary(&self.tally)
        {
            writeln!(self.out)?;
            writeln!(self.out, "{summary}")?;
            if let Some((rule, path)) = self.tally.last() {
                writeln!(self.out, "{}", ignore_hint(rule, path, &self.ignore_file))?;
            }
        }
        if let Some(github) = self.github.as_mut() {
            github.finish()?;
        }
        self.out.flush()?;
        Ok(self.tally)
    }
}

/// `There was 1 error (R: 1)` or `There were N errors (A: 1 B: 2)`.
#[must_use]
pub fn error_count_summary(tally: &RunTally) -> Option<String> {
    if tally.is_empty() {
        return None;
    }
    let by_type = tally
        .counts()
        .map(|(rule, n)| format!("{rule}: {n}"))
        .collect::<Vec<_>>()
        .join(" ");
    let total = tally.total();
    Some(if total == 1 {
        format!("There was 1 error ({by_type})")
    } else {
        format!("There were {total} errors ({by_type})")
    })
}

/// Guidance printed after the summary, using the last violation as a worked
/// suppression example.
#[must_use]
pub fn ignore_hint(rule: &str, path: &str, ignore_file: &str) -> String {
    format!(
        "You must fix all errors; for details on how to fix them, see
https://web-platform-tests.org/writing-tests/lint-tool.html

However, instead of fixing a particular error, it's sometimes
OK to add a line to the {ignore_file} file in the root of the
repository to make the lint tool ignore it.

For example, to make the lint tool ignore all '{rule}'
errors in the {path} file,
you could add the following line to the {ignore_file} file.

{rule}: {path}"
    )
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
