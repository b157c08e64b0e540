//! Scheduling of path, content and corpus checks.
//!
//! Path checks always run on the calling thread. Content checks either
//! follow them serially or are fanned out to a worker pool in chunks, with
//! the corpus batch submitted to the pool ahead of them and reported last.

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use rayon::ThreadPoolBuilder;
use tracing::{debug, info};

use crate::checks::Registry;
use crate::config::ParallelConfig;
use crate::error::Result;
use crate::ignorelist::SkipList;
use crate::output::{LintProgress, Reporter};
use crate::rules::PARSE_FAILED;
use crate::violation::Violation;

/// Scheduler settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LintOptions {
    /// Worker count; 0 means one per available CPU.
    pub jobs: usize,
    pub min_files_for_parallel: usize,
    pub chunk_size: usize,
    /// Hide the progress bar.
    pub quiet: bool,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self::from_config(&ParallelConfig::default(), 0, false)
    }
}

impl LintOptions {
    #[must_use]
    pub const fn from_config(parallel: &ParallelConfig, jobs: usize, quiet: bool) -> Self {
        Self {
            jobs,
            min_files_for_parallel: parallel.min_files,
            chunk_size: parallel.chunk_size,
            quiet,
        }
    }

    /// `jobs`, with 0 resolved to the available parallelism.
    #[must_use]
    pub fn effective_jobs(&self) -> usize {
        if self.jobs > 0 {
            return self.jobs;
        }
        thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }

    /// Parallel only pays off with more than one worker and enough files.
    #[must_use]
    pub fn mode_for(&self, content_targets: usize) -> RunMode {
        if self.effective_jobs() > 1 && content_targets >= self.min_files_for_parallel {
            RunMode::Parallel
        } else {
            RunMode::Serial
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Serial,
    Parallel,
}

/// Paths left after the existence and skip filters, and the subset that
/// gets content checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    pub paths: Vec<String>,
    pub content: Vec<String>,
}

/// Lint `paths` (relative to `root`), feeding every batch to `reporter`.
///
/// Missing paths and paths matching `skip` are dropped before any check
/// runs. Returns the mode the content checks ran in.
///
/// # Errors
/// Returns an error if the worker pool cannot be built or the reporter
/// fails to write.
pub fn lint(
    root: &Path,
    paths: &[String],
    registry: &Registry,
    skip: &SkipList,
    options: &LintOptions,
    reporter: &mut Reporter<'_>,
) -> Result<RunMode> {
    let targets = run_path_checks(root, paths, registry, skip, reporter)?;
    let mode = options.mode_for(targets.content.len());
    info!(
        "linting {} path(s), {} with content checks ({mode:?})",
        targets.paths.len(),
        targets.content.len()
    );

    match mode {
        RunMode::Serial => run_serial(root, &targets, registry, reporter)?,
        RunMode::Parallel => run_parallel(root, &targets, registry, options, reporter)?,
    }
    Ok(mode)
}

fn run_path_checks(
    root: &Path,
    paths: &[String],
    registry: &Registry,
    skip: &SkipList,
    reporter: &mut Reporter<'_>,
) -> Result<Targets> {
    let mut targets = Targets::default();
    for path in paths {
        let abs = root.join(path);
        if !abs.exists() {
            debug!("skipping missing path {path}");
            continue;
        }
        if skip.matches(path) {
            debug!("skipping {path}");
            continue;
        }

        reporter.record(registry.run_path_checks(root, path))?;

        if !abs.is_dir() {
            targets.content.push(path.clone());
        }
        targets.paths.push(path.clone());
    }
    Ok(targets)
}

fn run_serial(
    root: &Path,
    targets: &Targets,
    registry: &Registry,
    reporter: &mut Reporter<'_>,
) -> Result<()> {
    for path in &targets.content {
        reporter.record(registry.run_content_checks(root, path))?;
    }
    reporter.record(registry.run_corpus_checks(root, &targets.paths))?;
    Ok(())
}

fn run_parallel(
    root: &Path,
    targets: &Targets,
    registry: &Registry,
    options: &LintOptions,
    reporter: &mut Reporter<'_>,
) -> Result<()> {
    let jobs = options.effective_jobs();
    let pool = ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("lint-worker-{i}"))
        .build()?;
    debug!(
        "dispatching {} file(s) to {jobs} worker(s) in chunks of {}",
        targets.content.len(),
        options.chunk_size
    );

    let progress = LintProgress::new(targets.content.len() as u64, options.quiet);
    let (corpus_tx, corpus_rx) = mpsc::channel::<Vec<Violation>>();
    let (file_tx, file_rx) = mpsc::channel::<Vec<Violation>>();
    let all_paths = targets.paths.as_slice();

    let result = pool.in_place_scope(|scope| -> Result<()> {
        // Queued first so the longest task starts first.
        scope.spawn(move |_| {
            corpus_tx.send(registry.run_corpus_checks(root, all_paths)).ok();
        });

        for chunk in targets.content.chunks(options.chunk_size.max(1)) {
            let tx = file_tx.clone();
            let progress = progress.clone();
            scope.spawn(move |_| {
                for path in chunk {
                    let errors = registry.run_content_checks(root, path);
                    progress.inc();
                    if tx.send(errors).is_err() {
                        break;
                    }
                }
            });
        }
        drop(file_tx);

        for errors in file_rx {
            reporter.record(errors)?;
        }

        let corpus = corpus_rx.recv().unwrap_or_else(|_| {
            vec![PARSE_FAILED.error_with_message(".", "Unable to run the corpus checks".into())]
        });
        reporter.record(corpus)?;
        Ok(())
    });
    progress.finish();
    result
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
