use std::collections::BTreeSet;

use tempfile::TempDir;

use super::*;

fn corpus() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().canonicalize().unwrap();
    for (name, content) in [
        ("a.html", "a"),
        ("css/b.html", "b"),
        ("css/deep/c.js", "c"),
        ("build/out.tmp", "x"),
        (".gitignore", "*.tmp\n"),
        (".git/HEAD", "ref: refs/heads/main\n"),
    ] {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    (dir, root)
}

struct FakeChanged(Vec<&'static str>);

impl ChangedFiles for FakeChanged {
    fn get_changed_files(&self, _base_ref: &str) -> Result<BTreeSet<String>> {
        Ok(self.0.iter().map(|s| (*s).to_string()).collect())
    }
}

#[test]
fn all_lists_files_honouring_gitignore() {
    let (_dir, root) = corpus();
    let paths = PathSource::All.resolve(&root).unwrap();
    assert_eq!(
        paths,
        vec![".gitignore", "a.html", "css/b.html", "css/deep/c.js"]
    );
}

#[test]
fn explicit_directory_expands_to_its_files() {
    let (_dir, root) = corpus();
    let source = PathSource::Explicit(vec![root.join("css")]);
    assert_eq!(
        source.resolve(&root).unwrap(),
        vec!["css/b.html", "css/deep/c.js"]
    );
}

#[test]
fn explicit_paths_are_deduplicated_in_order() {
    let (_dir, root) = corpus();
    let source = PathSource::Explicit(vec![
        root.join("css/b.html"),
        root.join("a.html"),
        root.join("css"),
    ]);
    assert_eq!(
        source.resolve(&root).unwrap(),
        vec!["css/b.html", "a.html", "css/deep/c.js"]
    );
}

#[test]
fn explicit_missing_path_is_skipped() {
    let (_dir, root) = corpus();
    let source = PathSource::Explicit(vec![root.join("nope.html"), root.join("a.html")]);
    assert_eq!(source.resolve(&root).unwrap(), vec!["a.html"]);
}

#[test]
fn explicit_path_outside_root_is_skipped() {
    let (_dir, root) = corpus();
    let other = TempDir::new().unwrap();
    let outside = other.path().join("x.html");
    fs::write(&outside, "x").unwrap();
    let source = PathSource::Explicit(vec![outside]);
    assert!(source.resolve(&root).unwrap().is_empty());
}

#[test]
fn paths_file_lists_one_path_per_line() {
    let (_dir, root) = corpus();
    let listing = root.join("paths.txt");
    fs::write(
        &listing,
        format!("{}\n\n  {}  \n", root.join("a.html").display(), root.join("css").display()),
    )
    .unwrap();
    let paths = PathSource::PathsFile(listing).resolve(&root).unwrap();
    assert_eq!(paths, vec!["a.html", "css/b.html", "css/deep/c.js"]);
}

#[test]
fn missing_paths_file_is_an_error() {
    let (_dir, root) = corpus();
    let err = PathSource::PathsFile(root.join("missing.txt"))
        .resolve(&root)
        .unwrap_err();
    assert!(matches!(err, LintError::FileRead { .. }));
}

#[test]
fn full_scan_triggers() {
    let triggers = vec!["lint.ignore".to_string(), "tools/lint/".to_string()];
    assert!(needs_full_scan(&["lint.ignore".to_string()], &triggers));
    assert!(needs_full_scan(&["tools/lint/rules.py".to_string()], &triggers));
    assert!(!needs_full_scan(&["css/lint.ignore".to_string()], &triggers));
    assert!(!needs_full_scan(&["tools/linter.py".to_string()], &triggers));
    assert!(!needs_full_scan(&[], &triggers));
}

#[test]
fn changed_paths_strip_corpus_prefix() {
    let git = FakeChanged(vec!["corpus/a.html", "corpus/css/b.html", "other/x.html"]);
    assert_eq!(
        changed_paths(&git, "HEAD", "corpus").unwrap(),
        vec!["corpus/a.html", "corpus/css/b.html"]
            .into_iter()
            .map(|p| p.trim_start_matches("corpus/").to_string())
            .collect::<Vec<_>>()
    );
}

#[test]
fn changed_paths_at_work_tree_root_pass_through() {
    let git = FakeChanged(vec!["a.html", "tools/lint/x.py"]);
    assert_eq!(
        changed_paths(&git, "HEAD", "").unwrap(),
        vec!["a.html", "tools/lint/x.py"]
    );
}
