use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for content checks in a parallel run.
///
/// Hidden in quiet mode or when stderr is not a TTY. Clones share one bar.
#[derive(Clone)]
pub struct LintProgress {
    progress_bar: ProgressBar,
}

impl LintProgress {
    /// The bar draws on stderr so stdout stays machine-readable.
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, quiet, is_tty)
    }

    fn new_with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_progress_bar(total)
        };

        Self { progress_bar }
    }

    fn create_visible_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} Linting [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    /// Thread-safe; workers may call this directly.
    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
