//! Git integration: changed-file detection through gix and `.gitignore`
//! cross-checks through the `git` executable.

mod diff;
mod ignore;

pub use diff::{ChangedFiles, GitDiff};
pub use ignore::{IgnoreMatch, check_ignore, git_available};

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
