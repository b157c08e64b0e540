use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use super::*;

fn git(dir: &Path, args: &[&str]) {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
}

fn create_git_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init"]);
    git(dir.path(), &["config", "user.email", "test@test.com"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    dir
}

fn create_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn git_add_all(dir: &Path) {
    git(dir, &["add", "."]);
}

fn git_commit(dir: &Path, message: &str) {
    git(dir, &["commit", "-m", message]);
}

fn committed_repo() -> TempDir {
    let dir = create_git_repo();
    create_file(dir.path(), "main.html", "<p>main</p>");
    create_file(dir.path(), "css/a.html", "<p>a</p>");
    git_add_all(dir.path());
    git_commit(dir.path(), "Initial commit");
    dir
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn discover_finds_git_repo() {
    let dir = create_git_repo();
    assert!(GitDiff::discover(dir.path()).is_ok());
}

#[test]
fn discover_fails_for_missing_path() {
    let result = GitDiff::discover(Path::new("/nonexistent/path/that/does/not/exist"));
    assert!(result.is_err());
}

#[test]
fn workdir_returns_correct_path() {
    let dir = create_git_repo();
    let git_diff = GitDiff::discover(dir.path()).unwrap();
    assert_eq!(
        git_diff.workdir().canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}

// ============================================================================
// Committed range
// ============================================================================

#[test]
fn range_detects_added_and_modified_files() {
    let dir = committed_repo();
    create_file(dir.path(), "main.html", "<p>changed</p>");
    create_file(dir.path(), "css/b.html", "<p>b</p>");
    git_add_all(dir.path());
    git_commit(dir.path(), "Second");

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    let changed = git_diff.get_changed_files_range("HEAD~1", "HEAD").unwrap();
    assert_eq!(
        changed.into_iter().collect::<Vec<_>>(),
        vec!["css/b.html".to_string(), "main.html".to_string()]
    );
}

#[test]
fn range_same_ref_returns_empty() {
    let dir = committed_repo();
    let git_diff = GitDiff::discover(dir.path()).unwrap();
    assert!(git_diff.get_changed_files_range("HEAD", "HEAD").unwrap().is_empty());
}

#[test]
fn range_invalid_ref_returns_error() {
    let dir = committed_repo();
    let git_diff = GitDiff::discover(dir.path()).unwrap();
    assert!(git_diff.get_changed_files_range("nonexistent", "HEAD").is_err());
    assert!(git_diff.get_changed_files_range("HEAD", "nonexistent").is_err());
}

#[test]
fn range_skips_deleted_file_not_on_disk() {
    let dir = committed_repo();
    std::fs::remove_file(dir.path().join("css/a.html")).unwrap();
    git_add_all(dir.path());
    git_commit(dir.path(), "Delete file");

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    let changed = git_diff.get_changed_files_range("HEAD~1", "HEAD").unwrap();
    assert!(!changed.contains("css/a.html"));
}

// ============================================================================
// Working tree state
// ============================================================================

#[test]
fn staged_files_detects_staged_file() {
    let dir = committed_repo();
    create_file(dir.path(), "staged.html", "<p>staged</p>");
    git_add_all(dir.path());

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    let staged = git_diff.get_staged_files().unwrap();
    assert!(staged.contains("staged.html"));
    assert!(!staged.contains("main.html"));
}

#[test]
fn staged_files_in_new_repo_without_commits() {
    let dir = create_git_repo();
    create_file(dir.path(), "new.html", "<p>new</p>");
    git_add_all(dir.path());

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    assert!(git_diff.get_staged_files().unwrap().contains("new.html"));
}

#[test]
fn unstaged_files_detects_size_change() {
    let dir = committed_repo();
    create_file(dir.path(), "main.html", "<p>main, but longer now</p>");

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    let unstaged = git_diff.get_unstaged_files().unwrap();
    assert!(unstaged.contains("main.html"));
    assert!(!unstaged.contains("css/a.html"));
    assert!(git_diff.get_staged_files().unwrap().is_empty());
}

#[test]
fn untracked_files_are_reported_and_ignored_files_are_not() {
    let dir = committed_repo();
    create_file(dir.path(), ".gitignore", "*.tmp\n");
    create_file(dir.path(), "new/untracked.html", "<p>new</p>");
    create_file(dir.path(), "scratch.tmp", "junk");

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    let untracked = git_diff.get_untracked_files().unwrap();
    assert!(untracked.contains("new/untracked.html"));
    assert!(untracked.contains(".gitignore"));
    assert!(!untracked.contains("scratch.tmp"));
    assert!(!untracked.contains("main.html"));
}

// ============================================================================
// Union through the trait
// ============================================================================

#[test]
fn changed_files_empty_when_clean() {
    let dir = committed_repo();
    let git_diff = GitDiff::discover(dir.path()).unwrap();
    assert!(git_diff.get_changed_files("HEAD").unwrap().is_empty());
}

#[test]
fn changed_files_unions_committed_staged_and_untracked() {
    let dir = committed_repo();
    create_file(dir.path(), "committed.html", "<p>c</p>");
    git_add_all(dir.path());
    git_commit(dir.path(), "Second");
    create_file(dir.path(), "staged.html", "<p>s</p>");
    git_add_all(dir.path());
    create_file(dir.path(), "untracked.html", "<p>u</p>");

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    let changed = git_diff.get_changed_files("HEAD~1").unwrap();
    for path in ["committed.html", "staged.html", "untracked.html"] {
        assert!(changed.contains(path), "missing {path}");
    }
    assert!(!changed.contains("main.html"));
}

#[test]
fn changed_files_without_commits_uses_worktree_state() {
    let dir = create_git_repo();
    create_file(dir.path(), "a.html", "<p>a</p>");

    let git_diff = GitDiff::discover(dir.path()).unwrap();
    let changed = git_diff.get_changed_files("HEAD").unwrap();
    assert!(changed.contains("a.html"));
}

#[test]
fn changed_files_invalid_reference_returns_error() {
    let dir = committed_repo();
    let git_diff = GitDiff::discover(dir.path()).unwrap();
    assert!(git_diff.get_changed_files("nonexistent-branch").is_err());
}

// ============================================================================
// check-ignore
// ============================================================================

#[test]
fn ignore_match_parses_nul_separated_records() {
    let matches = IgnoreMatch::parse_all(b".gitignore\03\0*.tmp\0build/x.tmp\0");
    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.source, ".gitignore");
    assert_eq!(m.line, 3);
    assert_eq!(m.pattern, "*.tmp");
    assert_eq!(m.path, "build/x.tmp");
    assert!(!m.is_negated());
}

#[test]
fn ignore_match_keeps_separators_in_fields() {
    let matches = IgnoreMatch::parse_all(
        b"a/.gitignore\01\0!keep:me\0keep:me\0.gitignore\02\0*\0tab\there\0",
    );
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].pattern, "!keep:me");
    assert!(matches[0].is_negated());
    assert_eq!(matches[1].path, "tab\there");
}

#[test]
fn ignore_match_rejects_garbage() {
    assert!(IgnoreMatch::parse_all(b"").is_empty());
    assert!(IgnoreMatch::parse_all(b".gitignore\0x\0*.tmp\0path\0").is_empty());
    assert!(IgnoreMatch::parse_all(b".gitignore\01\0*.tmp\0").is_empty());
}

#[test]
fn check_ignore_reports_ignored_and_negated_paths() {
    let dir = committed_repo();
    create_file(dir.path(), ".gitignore", "*.tmp\n!keep.tmp\n");
    create_file(dir.path(), "a.tmp", "");
    create_file(dir.path(), "keep.tmp", "");

    let paths = vec![
        "a.tmp".to_string(),
        "keep.tmp".to_string(),
        "main.html".to_string(),
    ];
    let matches = check_ignore(dir.path(), &paths).unwrap();
    let summary: Vec<(&str, bool)> = matches
        .iter()
        .map(|m| (m.path.as_str(), m.is_negated()))
        .collect();
    assert_eq!(summary, vec![("a.tmp", false), ("keep.tmp", true)]);
}

#[test]
fn check_ignore_reports_non_ascii_paths_verbatim() {
    let dir = committed_repo();
    create_file(dir.path(), ".gitignore", "*.tmp\n");
    create_file(dir.path(), "café.tmp", "");

    let matches = check_ignore(dir.path(), &["café.tmp".to_string()]).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path, "café.tmp");
}

#[test]
fn check_ignore_with_no_matches_is_empty() {
    let dir = committed_repo();
    let matches = check_ignore(dir.path(), &["main.html".to_string()]).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn git_is_available_in_test_environment() {
    assert!(git_available());
}
