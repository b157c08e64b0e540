//! `.gitignore` cross-checks through the `git` executable.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use crate::{LintError, Result};

/// One record of `git check-ignore --verbose -z` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreMatch {
    /// File that holds the matching rule.
    pub source: String,
    pub line: usize,
    /// The rule itself, including any leading `!`.
    pub pattern: String,
    pub path: String,
}

impl IgnoreMatch {
    /// Parse NUL-separated `<source> <line> <pattern> <path>` records.
    ///
    /// Records with an unparsable line number are dropped, as is a trailing
    /// partial record.
    #[must_use]
    pub fn parse_all(output: &[u8]) -> Vec<Self> {
        let fields: Vec<&[u8]> = output
            .strip_suffix(b"\0")
            .unwrap_or(output)
            .split(|&b| b == 0)
            .collect();
        fields
            .chunks_exact(4)
            .filter_map(|record| {
                let line = std::str::from_utf8(record[1]).ok()?.parse().ok()?;
                Some(Self {
                    source: String::from_utf8_lossy(record[0]).into_owned(),
                    line,
                    pattern: String::from_utf8_lossy(record[2]).into_owned(),
                    path: String::from_utf8_lossy(record[3]).into_owned(),
                })
            })
            .collect()
    }

    /// Matches against a `!` exception are deliberate re-inclusions.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.pattern.starts_with('!')
    }
}

/// Whether a working `git` executable is on `PATH`.
#[must_use]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|out| out.status.success())
}

/// Ask git which of `paths` (relative to `root`) an ignore rule matches.
///
/// # Errors
/// Returns an error if `git` cannot be run or exits with a failure other
/// than "nothing matched".
pub fn check_ignore(root: &Path, paths: &[String]) -> Result<Vec<IgnoreMatch>> {
    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let mut child = Command::new("git")
        .args(["check-ignore", "--verbose", "--no-index", "--stdin", "-z"])
        .current_dir(root)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| LintError::Git(format!("Failed to run git check-ignore: {e}")))?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| LintError::Git("git check-ignore stdin unavailable".into()))?;
    let output = thread::scope(|scope| {
        scope.spawn(move || {
            for path in paths {
                if stdin.write_all(path.as_bytes()).is_err() || stdin.write_all(b"\0").is_err() {
                    break;
                }
            }
        });
        child.wait_with_output()
    })?;

    match output.status.code() {
        Some(0) => {}
        Some(1) => return Ok(Vec::new()),
        _ => {
            return Err(LintError::Git(format!(
                "git check-ignore failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
    }

    let matches = IgnoreMatch::parse_all(&output.stdout);
    debug!("git check-ignore matched {} path(s)", matches.len());
    Ok(matches)
}
