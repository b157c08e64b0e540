//! Output renderers as seen from the command line.

mod common;

use std::fs;

use common::TestFixture;
use predicates::prelude::*;

fn fixture_with_console_call() -> TestFixture {
    let fixture = TestFixture::new();
    fixture.create_file("x/y.js", "ok();\nconsole.log(1);\n");
    fixture
}

#[test]
fn json_is_one_object_per_line() {
    let fixture = fixture_with_console_call();

    let output = corpus_lint!()
        .current_dir(fixture.path())
        .args(["--all", "--json", "--quiet"])
        .output()
        .expect("binary should run");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["path"], "x/y.js");
    assert_eq!(records[0]["lineno"], 2);
    assert_eq!(records[0]["rule"], "CONSOLE");
    assert!(!stdout.contains("There was"));
}

#[test]
fn markdown_table_with_summary() {
    let fixture = fixture_with_console_call();

    corpus_lint!()
        .current_dir(fixture.path())
        .args(["--all", "--markdown", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "| Error Type | Position | Message |\n|------------|----------|---------|\n",
        ))
        .stdout(predicate::str::contains(
            "CONSOLE | x/y.js:2 | Test-file line has a `console.*(...)` call |",
        ))
        .stdout(predicate::str::contains("There was 1 error (CONSOLE: 1)"));
}

#[test]
fn text_summary_ends_with_worked_example() {
    let fixture = fixture_with_console_call();

    corpus_lint!()
        .current_dir(fixture.path())
        .args(["--all", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::ends_with("CONSOLE: x/y.js\n"));
}

#[test]
fn github_checks_file_wraps_errors_in_a_fence() {
    let fixture = fixture_with_console_call();
    let checks = TestFixture::new();
    let checks_file = checks.path().join("checks.md");

    corpus_lint!()
        .current_dir(fixture.path())
        .args(["--all", "--json", "--quiet"])
        .arg("--github-checks-text-file")
        .arg(&checks_file)
        .assert()
        .code(1);

    let written = fs::read_to_string(&checks_file).unwrap();
    assert!(written.starts_with("\nChanges in this PR contain lint errors"));
    assert!(written.ends_with(
        "```\nx/y.js:2: Test-file line has a `console.*(...)` call (CONSOLE)\n```\n"
    ));
}
