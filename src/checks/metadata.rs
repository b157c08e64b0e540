//! `META:` header comments in script tests and Python handlers.
//!
//! Metadata lines must form an unbroken block at the top of the file. Each
//! line is `// META: key=value` (or `# META: key=value` in Python).

use std::path::Path;
use std::sync::LazyLock;

use regex::bytes::{Regex, RegexBuilder};

use crate::checks::FileContent;
use crate::rules::{
    BROKEN_METADATA, INDENTED_METADATA, MALFORMED_VARIANT, MULTIPLE_TESTHARNESS,
    MULTIPLE_TESTHARNESSREPORT, STRAY_METADATA, UNKNOWN_GLOBAL_METADATA, UNKNOWN_METADATA,
    UNKNOWN_TIMEOUT_METADATA,
};
use crate::violation::Violation;

const SCRIPT_TEST_SUFFIXES: [&str; 3] = [".window.js", ".worker.js", ".any.js"];

/// Scopes accepted by `META: global=`.
pub const KNOWN_GLOBALS: &[&str] = &[
    "default",
    "window",
    "worker",
    "worker-module",
    "dedicatedworker",
    "dedicatedworker-module",
    "sharedworker",
    "sharedworker-module",
    "serviceworker",
    "serviceworker-module",
    "shadowrealm",
    "shadowrealm-in-window",
    "shadowrealm-in-shadowrealm",
    "shadowrealm-in-dedicatedworker",
    "shadowrealm-in-sharedworker",
    "shadowrealm-in-serviceworker",
    "shadowrealm-in-audioworklet",
    "jsshell",
];

static JS_META: LazyLock<MetaSyntax> = LazyLock::new(|| MetaSyntax::new("//"));
static PYTHON_META: LazyLock<MetaSyntax> = LazyLock::new(|| MetaSyntax::new("#"));

struct MetaSyntax {
    /// Well-formed metadata anchored at the start of the line.
    anchored: Regex,
    /// Well-formed metadata anywhere on the line.
    anywhere: Regex,
    /// Anything that looks like an attempt at metadata.
    broken: Regex,
}

impl MetaSyntax {
    fn new(comment: &str) -> Self {
        let body = format!(r"{comment}\s*META:\s*(\w*)=(.*)$");
        Self {
            anchored: compile(&format!("^{body}")),
            anywhere: compile(&body),
            broken: compile(&format!(r"{comment}\s*META:")),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .expect("built-in pattern is valid")
}

fn syntax_for(path: &str) -> Option<&'static MetaSyntax> {
    if SCRIPT_TEST_SUFFIXES.iter().any(|s| path.ends_with(s)) {
        Some(&*JS_META)
    } else if path.ends_with(".py") {
        Some(&*PYTHON_META)
    } else {
        None
    }
}

/// A variant must be a query string or fragment with something after the
/// leading `?` or `#`. An empty query followed by a fragment is rejected.
#[must_use]
pub fn is_variant_malformed(variant: &str) -> bool {
    !(variant.starts_with('?') || variant.starts_with('#'))
        || variant.len() == 1
        || variant.starts_with("?#")
}

#[must_use]
pub fn check_script_metadata(_root: &Path, path: &str, content: &FileContent) -> Vec<Violation> {
    let Some(syntax) = syntax_for(path) else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    let mut in_header = true;
    for (line_no, line) in content.lines() {
        match syntax.anchored.captures(line) {
            Some(caps) => {
                let key = caps.get(1).map_or(&b""[..], |m| m.as_bytes());
                let value = caps.get(2).map_or(&b""[..], |m| m.as_bytes());
                errors.extend(
                    check_entry(path, key, value)
                        .into_iter()
                        .map(|e| e.with_line(line_no)),
                );
            }
            None => in_header = false,
        }

        if in_header {
            continue;
        }
        let misplaced = if syntax.anchored.is_match(line) {
            Some(STRAY_METADATA)
        } else if syntax.anywhere.is_match(line) {
            Some(INDENTED_METADATA)
        } else if syntax.broken.is_match(line) {
            Some(BROKEN_METADATA)
        } else {
            None
        };
        if let Some(rule) = misplaced {
            errors.push(rule.error(path).with_line(line_no));
        }
    }
    errors
}

fn check_entry(path: &str, key: &[u8], value: &[u8]) -> Vec<Violation> {
    match key {
        b"global" => unknown_globals(value)
            .map(|_| UNKNOWN_GLOBAL_METADATA.error(path))
            .collect(),
        b"timeout" if value != b"long" => vec![UNKNOWN_TIMEOUT_METADATA.error(path)],
        b"timeout" => Vec::new(),
        b"variant" => {
            let variant = String::from_utf8_lossy(value);
            if is_variant_malformed(&variant) {
                let context = format!("{path} `META: variant=...` value");
                vec![MALFORMED_VARIANT.error_with(path, &[&context])]
            } else {
                Vec::new()
            }
        }
        b"script" if value == b"/resources/testharness.js" => {
            vec![MULTIPLE_TESTHARNESS.error(path)]
        }
        b"script" if value == b"/resources/testharnessreport.js" => {
            vec![MULTIPLE_TESTHARNESSREPORT.error(path)]
        }
        b"script" | b"title" | b"quic" => Vec::new(),
        _ => vec![UNKNOWN_METADATA.error(path)],
    }
}

/// Distinct unrecognized scopes in a `global=` list.
fn unknown_globals(value: &[u8]) -> impl Iterator<Item = String> {
    let mut seen: Vec<String> = Vec::new();
    for item in value.split(|&b| b == b',') {
        let item = String::from_utf8_lossy(item.trim_ascii()).into_owned();
        if item.is_empty() || seen.contains(&item) {
            continue;
        }
        seen.push(item);
    }
    seen.into_iter()
        .filter(|item| !KNOWN_GLOBALS.contains(&item.as_str()))
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
