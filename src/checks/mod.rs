//! Check registry and the built-in checks.
//!
//! Checks come in three shapes, distinguished by what they are handed:
//! a path, a path plus the file's bytes, or the whole filtered path list.

pub mod content;
pub mod corpus;
pub mod metadata;
pub mod path;

use std::any::Any;
use std::fs;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, warn};

use crate::git;
use crate::rules::PARSE_FAILED;
use crate::violation::Violation;

pub type PathCheckFn = fn(&Path, &str) -> Vec<Violation>;
pub type ContentCheckFn = fn(&Path, &str, &FileContent) -> Vec<Violation>;
pub type CorpusCheckFn = fn(&Path, &[String]) -> Vec<Violation>;

/// A check function tagged with the input it expects.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    Path(PathCheckFn),
    Content(ContentCheckFn),
    Corpus(CorpusCheckFn),
}

/// File bytes read once and shared by every content check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent {
    bytes: Vec<u8>,
}

impl FileContent {
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn read(path: &Path) -> io::Result<Self> {
        fs::read(path).map(Self::new)
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lines numbered from 1, without their `\n` terminator.
    ///
    /// A `\r` before the newline is kept.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.bytes
            .split_inclusive(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\n").unwrap_or(line))
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
    }
}

#[derive(Debug, Clone, Copy)]
struct Named<F> {
    name: &'static str,
    run: F,
}

/// Ordered lists of path, content and corpus checks.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    path: Vec<Named<PathCheckFn>>,
    content: Vec<Named<ContentCheckFn>>,
    corpus: Vec<Named<CorpusCheckFn>>,
}

impl Registry {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in checks, probing for `git` to decide whether the
    /// `.gitignore` cross-check can run.
    #[must_use]
    pub fn builtin() -> Self {
        let has_git = git::git_available();
        if !has_git {
            warn!("No git present; skipping .gitignore lint.");
        }
        Self::with_git(has_git)
    }

    #[must_use]
    pub fn with_git(has_git: bool) -> Self {
        let mut registry = Self::empty();

        registry.register("file type", Check::Path(path::check_file_type));
        registry.register("path length", Check::Path(path::check_path_length));
        registry.register("worker collision", Check::Path(path::check_worker_collision));
        registry.register("ahem copy", Check::Path(path::check_ahem_copy));
        registry.register("mojom js", Check::Path(path::check_mojom_js));
        registry.register(
            "tentative directories",
            Check::Path(path::check_tentative_directories),
        );
        registry.register("gitignore file", Check::Path(path::check_gitignore_file));

        registry.register("regexp line", Check::Content(content::check_regexp_line));
        registry.register(
            "script metadata",
            Check::Content(metadata::check_script_metadata),
        );
        registry.register(
            "ahem system font",
            Check::Content(content::check_ahem_system_font),
        );

        registry.register(
            "unique testharness basenames",
            Check::Corpus(corpus::check_unique_testharness_basenames),
        );
        registry.register(
            "unique case-insensitive paths",
            Check::Corpus(corpus::check_unique_case_insensitive_paths),
        );
        if has_git {
            registry.register("git ignore", Check::Corpus(corpus::check_git_ignore));
        }

        registry
    }

    pub fn register(&mut self, name: &'static str, check: Check) {
        match check {
            Check::Path(run) => self.path.push(Named { name, run }),
            Check::Content(run) => self.content.push(Named { name, run }),
            Check::Corpus(run) => self.corpus.push(Named { name, run }),
        }
    }

    #[must_use]
    pub fn path_check_names(&self) -> Vec<&'static str> {
        self.path.iter().map(|c| c.name).collect()
    }

    #[must_use]
    pub fn content_check_names(&self) -> Vec<&'static str> {
        self.content.iter().map(|c| c.name).collect()
    }

    #[must_use]
    pub fn corpus_check_names(&self) -> Vec<&'static str> {
        self.corpus.iter().map(|c| c.name).collect()
    }

    /// Run every path check against one path.
    ///
    /// A panicking check contributes a single `PARSE-FAILED` record.
    #[must_use]
    pub fn run_path_checks(&self, root: &Path, path: &str) -> Vec<Violation> {
        let mut errors = Vec::new();
        let mut failed = false;
        for check in &self.path {
            match guarded(check.name, path, || (check.run)(root, path)) {
                Some(found) => errors.extend(found),
                None => failed = true,
            }
        }
        if failed {
            errors.push(PARSE_FAILED.error(path));
        }
        errors
    }

    /// Read the file once and run every content check over it.
    ///
    /// An unreadable file or a panicking check yields one `PARSE-FAILED`
    /// record for the path; the remaining checks still run.
    #[must_use]
    pub fn run_content_checks(&self, root: &Path, path: &str) -> Vec<Violation> {
        let content = match FileContent::read(&root.join(path)) {
            Ok(content) => content,
            Err(e) => {
                debug!("failed to read {path}: {e}");
                return vec![PARSE_FAILED.error(path)];
            }
        };

        let mut errors = Vec::new();
        let mut failed = false;
        for check in &self.content {
            match guarded(check.name, path, || (check.run)(root, path, &content)) {
                Some(found) => errors.extend(found),
                None => failed = true,
            }
        }
        if failed {
            errors.push(PARSE_FAILED.error(path));
        }
        errors
    }

    /// Run every corpus check over the full path list.
    #[must_use]
    pub fn run_corpus_checks(&self, root: &Path, paths: &[String]) -> Vec<Violation> {
        let mut errors = Vec::new();
        for check in &self.corpus {
            match guarded(check.name, ".", || (check.run)(root, paths)) {
                Some(found) => errors.extend(found),
                None => errors.push(PARSE_FAILED.error_with_message(
                    ".",
                    format!("Unable to run the {} check", check.name),
                )),
            }
        }
        errors
    }
}

fn guarded<F>(name: &str, path: &str, run: F) -> Option<Vec<Violation>>
where
    F: FnOnce() -> Vec<Violation>,
{
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(errors) => Some(errors),
        Err(payload) => {
            warn!(
                "{name} check panicked on {path}: {}",
                panic_message(payload.as_ref())
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
