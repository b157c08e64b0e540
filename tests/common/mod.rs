#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the corpus-lint binary.
#[macro_export]
macro_rules! corpus_lint {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("corpus-lint"))
    };
}

/// A clean ignorelist with one comment line.
pub const EMPTY_IGNORELIST: &str = "# known lint errors\n";

/// Creates a temporary corpus for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn create_ignorelist(&self, content: &str) {
        self.create_file("lint.ignore", content);
    }

    pub fn create_config(&self, content: &str) {
        self.create_file("corpus-lint.toml", content);
    }

    /// A clean testharness test.
    pub fn create_clean_test(&self, relative_path: &str) {
        self.create_file(
            relative_path,
            "<!doctype html>\n<script src=\"/resources/testharness.js\"></script>\n",
        );
    }

    /// Runs git in the fixture, panicking on failure.
    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {args:?} failed");
    }

    /// Initializes a repository with one commit holding every current file.
    pub fn init_git_with_commit(&self) {
        self.git(&["init", "-q"]);
        self.git(&["config", "user.email", "lint@example.com"]);
        self.git(&["config", "user.name", "Lint Test"]);
        self.git(&["config", "commit.gpgsign", "false"]);
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", "initial"]);
    }
}
