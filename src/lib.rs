pub mod checks;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod ignorelist;
pub mod output;
pub mod rules;
pub mod runner;
pub mod source;
pub mod violation;

pub use error::{LintError, Result};
pub use violation::Violation;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_LINT_ERRORS: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
