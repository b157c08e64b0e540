//! Built-in rule catalog.
//!
//! Each [`Rule`] pairs a stable identifier (the token users write in
//! `lint.ignore`) with a message template. `{}` placeholders in the template
//! are filled in order from the context passed to [`Rule::error_with`].

#![allow(clippy::literal_string_with_formatting_args)] // {} is template syntax

use crate::violation::Violation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub description: &'static str,
}

impl Rule {
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }

    #[must_use]
    pub fn error(self, path: &str) -> Violation {
        Violation::new(self.name, self.description, path)
    }

    #[must_use]
    pub fn error_with(self, path: &str, context: &[&str]) -> Violation {
        Violation::new(self.name, fill_template(self.description, context), path)
    }

    /// Report under this rule's id with a message that replaces the template.
    #[must_use]
    pub fn error_with_message(self, path: &str, message: String) -> Violation {
        Violation::new(self.name, message, path)
    }
}

fn fill_template(template: &str, context: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = context.iter();
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

/// Rule id that can never be suppressed by the ignorelist: its message
/// already explains the only acceptable fix.
pub const NON_SUPPRESSIBLE: &str = IGNORED_PATH.name;

// Path rules
pub const FILE_TYPE: Rule = Rule::new("FILE TYPE", "/{} is an unsupported file type ({})");
pub const PATH_LENGTH: Rule = Rule::new(
    "PATH LENGTH",
    "/{} longer than maximum path length ({} > 150)",
);
pub const WORKER_COLLISION: Rule = Rule::new(
    "WORKER COLLISION",
    "path ends with {} which collides with generated tests from {} files",
);
pub const AHEM_COPY: Rule = Rule::new(
    "AHEM COPY",
    "Don't add extra copies of Ahem, use /fonts/Ahem.ttf",
);
pub const MOJOM_JS: Rule = Rule::new("MOJOM-JS", "Don't check *.mojom.js files into the corpus");
pub const TENTATIVE_DIRECTORY_NAME: Rule = Rule::new(
    "TENTATIVE-DIRECTORY-NAME",
    "Directories for tentative tests must be named exactly 'tentative'",
);
pub const GITIGNORE_FILE: Rule = Rule::new("GITIGNORE", ".gitignore found outside the root");

// Content rules
pub const PARSE_FAILED: Rule = Rule::new("PARSE-FAILED", "Unable to parse file");
pub const TRAILING_WHITESPACE: Rule = Rule::new("TRAILING WHITESPACE", "Whitespace at EOL");
pub const INDENT_TABS: Rule = Rule::new(
    "INDENT TABS",
    "Test-file line starts with one or more tab characters",
);
pub const CR_AT_EOL: Rule = Rule::new(
    "CR AT EOL",
    "Test-file line ends with CR (U+000D) character",
);
pub const SET_TIMEOUT: Rule = Rule::new(
    "SET TIMEOUT",
    "setTimeout used; step_timeout should typically be used instead",
);
pub const W3C_TEST_ORG: Rule = Rule::new(
    "W3C-TEST.ORG",
    "Test-file line has the string `w3c-test.org`",
);
pub const WEB_PLATFORM_TEST: Rule = Rule::new(
    "WEB-PLATFORM.TEST",
    "Internal web-platform.test domain used",
);
pub const WEBIDL2_JS: Rule = Rule::new("WEBIDL2.JS", "Legacy webidl2.js script used");
pub const CONSOLE: Rule = Rule::new("CONSOLE", "Test-file line has a `console.*(...)` call");
pub const GENERATE_TESTS: Rule = Rule::new(
    "GENERATE_TESTS",
    "Test-file line has a `generate_tests(...)` call; use `test()` or variants instead",
);
pub const PRINT_STATEMENT: Rule = Rule::new(
    "PRINT STATEMENT",
    "A server-side python support file contains a `print` statement",
);
pub const LAYOUTTESTS_APIS: Rule = Rule::new(
    "LAYOUTTESTS APIS",
    "eventSender/testRunner/internals used; these are LayoutTests-specific APIs",
);
pub const MISSING_DEPENDENCY: Rule = Rule::new(
    "MISSING DEPENDENCY",
    "Chromium-specific content referenced",
);
pub const SPECIALPOWERS_API: Rule = Rule::new(
    "SPECIALPOWERS API",
    "SpecialPowers used; this is gecko-specific and not supported",
);
pub const ASSERT_THROWS: Rule = Rule::new(
    "ASSERT_THROWS",
    "Test-file line has an `assert_throws(...)` call",
);
pub const PROMISE_REJECTS: Rule = Rule::new(
    "PROMISE_REJECTS",
    "Test-file line has a `promise_rejects(...)` call",
);
pub const ASSERT_PRECONDITION: Rule = Rule::new(
    "ASSERT-PRECONDITION",
    "Test-file line has an `assert_precondition(...)` call",
);
pub const HTML_INVALID_SYNTAX: Rule = Rule::new(
    "HTML INVALID SYNTAX",
    "Test-file line has a non-void HTML tag with /> syntax",
);
pub const TESTDRIVER_INTERNAL: Rule = Rule::new(
    "TESTDRIVER-INTERNAL",
    "Test-file uses test_driver_internal API",
);
pub const AHEM_SYSTEM_FONT: Rule = Rule::new(
    "AHEM SYSTEM FONT",
    "Don't use Ahem as a system font, use /fonts/ahem.css",
);

// Script metadata rules
pub const UNKNOWN_GLOBAL_METADATA: Rule = Rule::new(
    "UNKNOWN-GLOBAL-METADATA",
    "Unexpected value for global metadata",
);
pub const UNKNOWN_TIMEOUT_METADATA: Rule = Rule::new(
    "UNKNOWN-TIMEOUT-METADATA",
    "Unexpected value for the timeout metadata",
);
pub const UNKNOWN_METADATA: Rule = Rule::new("UNKNOWN-METADATA", "Unexpected kind of metadata");
pub const STRAY_METADATA: Rule = Rule::new(
    "STRAY-METADATA",
    "Metadata comments should start the file",
);
pub const INDENTED_METADATA: Rule = Rule::new(
    "INDENTED-METADATA",
    "Metadata comments should start the line",
);
pub const BROKEN_METADATA: Rule = Rule::new(
    "BROKEN-METADATA",
    "Metadata comment is not formatted correctly",
);
pub const MALFORMED_VARIANT: Rule = Rule::new(
    "MALFORMED-VARIANT",
    "{} must be a non empty string and start with '?' or '#'",
);
pub const MULTIPLE_TESTHARNESS: Rule = Rule::new(
    "MULTIPLE-TESTHARNESS",
    "More than one `<script src='/resources/testharness.js'>`",
);
pub const MULTIPLE_TESTHARNESSREPORT: Rule = Rule::new(
    "MULTIPLE-TESTHARNESSREPORT",
    "More than one `<script src='/resources/testharnessreport.js'>`",
);

// Corpus rules
pub const DUPLICATE_BASENAME_PATH: Rule = Rule::new(
    "DUPLICATE BASENAME PATH",
    "File has identical basename path (path excluding extension) as other file(s) (found extensions: {})",
);
pub const DUPLICATE_CASE_INSENSITIVE_PATH: Rule = Rule::new(
    "DUPLICATE-CASE-INSENSITIVE-PATH",
    "Path differs from path {} only in case",
);
pub const IGNORED_PATH: Rule = Rule::new(
    "IGNORED PATH",
    "{} matches an ignore filter in .gitignore - please add a .gitignore exception",
);

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
