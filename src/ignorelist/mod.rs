//! The `lint.ignore` suppression model.
//!
//! The file is a list of `RULE[,RULE...]:glob[:line]` entries. Entries naming a
//! rule suppress matching violations after the fact; entries whose rule list
//! contains `*` instead keep the matching files out of every check.

mod pattern;

pub use pattern::{GlobPattern, normcase};

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{LintError, Result};
use crate::rules::NON_SUPPRESSIBLE;
use crate::violation::Violation;

/// Rule id that turns an entry into a whole-file skip.
const SKIP_ALL: &str = "*";

/// Suppressions for one rule and one glob.
///
/// `None` in `lines` means the whole file is suppressed for the rule.
#[derive(Debug, Clone)]
pub struct IgnoreEntry {
    pattern: GlobPattern,
    lines: BTreeSet<Option<usize>>,
}

impl IgnoreEntry {
    fn covers_line(&self, line: Option<usize>) -> bool {
        self.lines.contains(&None) || self.lines.contains(&line)
    }
}

/// Two-level map: rule id, then glob, then suppressed lines.
#[derive(Debug, Clone, Default)]
pub struct Ignorelist {
    rules: IndexMap<String, IndexMap<String, IgnoreEntry>>,
}

/// Globs of files excluded from every check.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    patterns: IndexMap<String, GlobPattern>,
}

impl SkipList {
    /// Add a glob; duplicates (after case normalization) are ignored.
    ///
    /// # Errors
    /// Returns an error if the glob is invalid.
    pub fn add(&mut self, pattern: &str) -> Result<()> {
        let compiled = GlobPattern::new(pattern)?;
        self.patterns
            .entry(compiled.as_str().to_string())
            .or_insert(compiled);
        Ok(())
    }

    /// # Errors
    /// Returns an error if any glob is invalid.
    pub fn extend<I, S>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.add(pattern.as_ref())?;
        }
        Ok(())
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let normalized = normcase(path);
        self.patterns
            .values()
            .any(|p| p.is_match_normalized(&normalized))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Ignorelist {
    /// Parse ignorelist source text.
    ///
    /// # Errors
    /// Returns an error naming the offending line if an entry does not have
    /// two or three `:`-separated fields, if its line number is not a positive
    /// integer, or if its glob is invalid.
    pub fn parse(source: &str) -> Result<(Self, SkipList)> {
        let mut ignorelist = Self::default();
        let mut skipped = SkipList::default();

        for (idx, raw) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let entry = parse_entry(line).map_err(|message| LintError::Ignorelist {
                line: line_no,
                message,
            })?;

            if entry.rules.contains(&SKIP_ALL) {
                skipped.add(entry.glob)?;
                continue;
            }
            for rule in entry.rules {
                ignorelist.insert(rule, entry.glob, entry.line)?;
            }
        }

        Ok((ignorelist, skipped))
    }

    /// Load and parse the ignorelist at `path`. A missing file yields an empty
    /// ignorelist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<(Self, SkipList)> {
        match fs::read_to_string(path) {
            Ok(source) => Self::parse(&source),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no ignorelist at {}", path.display());
                Ok((Self::default(), SkipList::default()))
            }
            Err(source) => Err(LintError::FileRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn insert(&mut self, rule: &str, glob: &str, line: Option<usize>) -> Result<()> {
        let key = normcase(glob);
        let per_rule = self.rules.entry(rule.to_string()).or_default();
        if let Some(entry) = per_rule.get_mut(&key) {
            entry.lines.insert(line);
            return Ok(());
        }
        let entry = IgnoreEntry {
            pattern: GlobPattern::new(&key)?,
            lines: BTreeSet::from([line]),
        };
        per_rule.insert(key, entry);
        Ok(())
    }

    /// Drop every violation covered by an entry for its rule.
    ///
    /// Violations of the non-suppressible rule always survive.
    #[must_use]
    pub fn filter(&self, errors: Vec<Violation>) -> Vec<Violation> {
        if self.rules.is_empty() {
            return errors;
        }
        errors
            .into_iter()
            .filter(|error| !self.suppresses(error))
            .collect()
    }

    #[must_use]
    pub fn suppresses(&self, error: &Violation) -> bool {
        if error.rule == NON_SUPPRESSIBLE {
            return false;
        }
        let Some(entries) = self.rules.get(&error.rule) else {
            return false;
        };
        let path = normcase(&error.path);
        entries
            .values()
            .any(|entry| entry.covers_line(error.line) && entry.pattern.is_match_normalized(&path))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of distinct (rule, glob) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.values().map(IndexMap::len).sum()
    }
}

struct RawEntry<'a> {
    rules: Vec<&'a str>,
    glob: &'a str,
    line: Option<usize>,
}

fn parse_entry(line: &str) -> std::result::Result<RawEntry<'_>, String> {
    let parts: Vec<&str> = line.split(':').map(str::trim).collect();
    let (rules, glob, line_no) = match parts.as_slice() {
        [rules, glob] => (*rules, *glob, None),
        [rules, glob, line_no] => (*rules, *glob, Some(*line_no)),
        _ => {
            return Err(format!(
                "expected RULE[,RULE...]:glob[:line], found {} field(s)",
                parts.len()
            ));
        }
    };

    let rules: Vec<&str> = rules
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();
    if rules.is_empty() {
        return Err("no rule id given".to_string());
    }
    if glob.is_empty() {
        return Err("empty file pattern".to_string());
    }

    let line = match line_no {
        None => None,
        Some(s) => match s.parse::<usize>() {
            Ok(n) if n > 0 => Some(n),
            _ => return Err(format!("invalid line number '{s}'")),
        },
    };

    Ok(RawEntry { rules, glob, line })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
